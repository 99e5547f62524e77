pub mod citizenship;
pub mod customer;
pub mod history;
pub mod user;

pub use citizenship::citizenship_config;
pub use customer::customer_config;
pub use history::history_config;
pub use user::{CookieSettings, user_config};

use actix_web::{HttpResponse, error, web};
use crate::models::MessageResponse;

/// 请求体无法解析时返回 400 + Message
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Malformed JSON body: {err}");
        let response = HttpResponse::BadRequest().json(MessageResponse::new(err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}

/// 缺少或无法解析查询参数时返回 400 + Message
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("Malformed query string: {err}");
        let response = HttpResponse::BadRequest().json(MessageResponse::new(err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}

/// 挂在 `/api` 下的全部业务路由
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(customer_config)
        .configure(history_config)
        .configure(citizenship_config)
        .configure(user_config);
}
