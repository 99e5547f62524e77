use crate::error::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub exp: i64,
    pub iat: i64,
}

/// 时间来源, 测试中可替换为固定时钟
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expires_in: i64,
    clock: Arc<dyn Clock>,
}

impl JwtService {
    pub fn new(secret: &str, token_expires_in: i64) -> Self {
        Self::with_clock(secret, token_expires_in, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, token_expires_in: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expires_in,
            clock,
        }
    }

    pub fn generate_token(&self, username: &str) -> AppResult<String> {
        let now = self.clock.now();
        let exp = now + Duration::seconds(self.token_expires_in);

        let claims = Claims {
            sub: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    /// 校验签名与过期时间; 过期判断使用注入的时钟而非 jsonwebtoken 内置的系统时间
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token verification failed: {e}");
                AppError::Unauthorized("token is invalid".to_string())
            })?;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(AppError::Expired("token is expired".to_string()));
        }

        Ok(claims)
    }

    pub fn get_token_expires_in(&self) -> i64 {
        self.token_expires_in
    }
}
