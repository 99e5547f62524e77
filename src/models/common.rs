use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 仅包含提示信息的响应, 例如删除成功或业务类失败
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 错误响应体
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub success: bool,
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}
