use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Empty(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Expired(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// 将唯一约束 / 外键冲突从底层数据库错误中识别出来, 其它错误原样保留
    pub fn from_db(err: DbErr, conflict_message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                log::warn!("Unique constraint violation: {detail}");
                AppError::Conflict(conflict_message.to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                log::warn!("Foreign key violation: {detail}");
                AppError::NotFound("Referenced record does not exist".to_string())
            }
            _ => AppError::DatabaseError(err),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Empty(_) => "EMPTY",
            AppError::Unauthorized(_) | AppError::JwtError(_) => "UNAUTHORIZED",
            AppError::Expired(_) => "EXPIRED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 业务类错误 (校验/冲突/不存在/空结果) 以 200 + Message 返回
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::Conflict(_)
                | AppError::NotFound(_)
                | AppError::Empty(_)
        )
    }

    pub fn soft_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(json!({
            "success": false,
            "code": self.code(),
            "Message": self.to_string(),
        }))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_soft() => StatusCode::OK,
            AppError::Unauthorized(_) | AppError::Expired(_) | AppError::JwtError(_) => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            _ if self.is_soft() => {
                log::warn!("Request rejected ({}): {self}", self.code());
                self.to_string()
            }
            AppError::Unauthorized(msg) | AppError::Expired(msg) => {
                log::warn!("Authentication error: {msg}");
                msg.clone()
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                "Invalid token".to_string()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Internal Error!".to_string()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal Error!".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "code": self.code(),
            "Message": message,
        }))
    }
}
