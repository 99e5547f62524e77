use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use crate::error::AppError;
use crate::models::*;
use crate::services::AuthService;

pub const TOKEN_COOKIE: &str = "token";

/// 登录令牌 cookie 的属性
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    /// 跨站部署 (https) 时需为 true
    pub secure: bool,
}

impl CookieSettings {
    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build(TOKEN_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .max_age(max_age);
        if self.secure {
            builder = builder.same_site(SameSite::None);
        }
        builder.finish()
    }

    pub fn token_cookie(&self, token: String, expires_in: i64) -> Cookie<'static> {
        self.build(token, Duration::seconds(expires_in))
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.build(String::new(), Duration::ZERO)
    }
}

/// 请求体中的 Token 优先, 为空时退回 cookie 中的令牌
fn resolve_token(req: &HttpRequest, body: Option<web::Json<TokenRequest>>) -> Option<String> {
    let cookie = req.cookie(TOKEN_COOKIE)?.value().to_string();
    let token = body
        .map(|b| b.into_inner().token)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(cookie);
    Some(token)
}

fn missing_cookie(message: &str) -> HttpResponse {
    AppError::Unauthorized(message.to_string()).error_response()
}

#[utoipa::path(
    post,
    path = "/userLogin",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功, 同时写入 token cookie; 账号或密码错误时返回 Message 且不写 cookie", body = LoginResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    cookie_settings: web::Data<CookieSettings>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login(&request.username, &request.password).await {
        Ok(token) => {
            let cookie = cookie_settings.token_cookie(token.clone(), auth_service.token_expires_in());
            Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
                message: "Login successfully".to_string(),
                token,
            }))
        }
        Err(e @ (AppError::NotFound(_) | AppError::Unauthorized(_))) => Ok(e.soft_response()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/userAuthentication",
    tag = "user",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "令牌有效", body = AuthenticationResponse),
        (status = 401, description = "缺少 cookie / 令牌无效 / 令牌过期", body = ApiError)
    ),
    security(("cookie_auth" = []))
)]
pub async fn authentication(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    body: Option<web::Json<TokenRequest>>,
) -> Result<HttpResponse> {
    let Some(token) = resolve_token(&req, body) else {
        return Ok(missing_cookie("Authentication failed"));
    };
    match auth_service.authenticate(&token).await {
        Ok(username) => Ok(HttpResponse::Ok().json(AuthenticationResponse {
            message: "Authentication successfully".to_string(),
            username,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/userLogout",
    tag = "user",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "登出成功并清除 cookie", body = MessageResponse),
        (status = 401, description = "缺少 cookie / 令牌无效 / 令牌过期", body = ApiError)
    ),
    security(("cookie_auth" = []))
)]
pub async fn logout(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    cookie_settings: web::Data<CookieSettings>,
    body: Option<web::Json<TokenRequest>>,
) -> Result<HttpResponse> {
    let Some(token) = resolve_token(&req, body) else {
        return Ok(missing_cookie("Not logged in yet"));
    };
    match auth_service.logout(&token).await {
        Ok(_) => Ok(HttpResponse::Ok()
            .cookie(cookie_settings.removal_cookie())
            .json(MessageResponse::new("Logout successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/userLogin", web::post().to(login))
        .route("/userAuthentication", web::post().to(authentication))
        .route("/userLogout", web::post().to(logout));
}
