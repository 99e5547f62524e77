use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "Username")]
    #[schema(example = "admin")]
    pub username: String,
    #[serde(rename = "Password")]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[serde(rename = "Token", default)]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "Message")]
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticationResponse {
    #[serde(rename = "Message")]
    pub message: String,
    pub username: String,
}
