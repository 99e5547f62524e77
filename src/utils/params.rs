use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use uuid::Uuid;

/// 解析 YYYY-MM-DD 日期
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::ValidationError(format!("{field} must be a date in YYYY-MM-DD format")))
}

pub fn parse_uuid(field: &str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("{field} is not a valid id")))
}
