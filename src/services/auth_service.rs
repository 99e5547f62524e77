use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;
use crate::utils::{JwtService, hash_password, verify_password};
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_service,
        }
    }

    /// 登录成功返回签名令牌 (用户名 + 过期时间)
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let user = self
            .users
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("password is incorrect".to_string()));
        }

        let token = self.jwt_service.generate_token(&user.username)?;
        log::info!("User {} logged in", user.username);
        Ok(token)
    }

    /// 校验令牌, 返回其中的用户名
    pub async fn authenticate(&self, token: &str) -> AppResult<String> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("token is missing".to_string()));
        }
        let claims = self.jwt_service.verify_token(token)?;
        Ok(claims.sub)
    }

    /// 令牌为无状态令牌, 登出只校验令牌, 由调用方清除 cookie
    pub async fn logout(&self, token: &str) -> AppResult<String> {
        let username = self.authenticate(token).await?;
        log::info!("User {username} logged out");
        Ok(username)
    }

    pub async fn create_user(&self, username: &str, password: &str) -> AppResult<users::Model> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("This user is already existed".to_string()));
        }

        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
        };
        self.users
            .create(model)
            .await
            .map_err(|e| AppError::from_db(e, "This user is already existed"))
    }

    /// 启动时确保后台账号存在; 已存在则不做任何修改
    pub async fn ensure_user(&self, username: &str, password: &str) -> AppResult<()> {
        if self.users.find_by_username(username.trim()).await?.is_some() {
            return Ok(());
        }
        self.create_user(username, password).await?;
        log::info!("Provisioned user {}", username.trim());
        Ok(())
    }

    pub fn token_expires_in(&self) -> i64 {
        self.jwt_service.get_token_expires_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeClock, inmem_db};
    use std::sync::Arc;

    async fn setup(expires_in: i64) -> (AuthService, Arc<FakeClock>) {
        let clock = Arc::new(FakeClock::default());
        let jwt = JwtService::with_clock("test-secret", expires_in, clock.clone());
        let service = AuthService::new(inmem_db().await, jwt);
        service.create_user("alice", "correct").await.unwrap();
        (service, clock)
    }

    #[tokio::test]
    async fn test_login_then_authenticate_until_expiry() {
        let (service, clock) = setup(3600).await;

        let token = service.login("alice", "correct").await.unwrap();
        assert_eq!(service.authenticate(&token).await.unwrap(), "alice");

        clock.advance(3599);
        assert_eq!(service.authenticate(&token).await.unwrap(), "alice");

        clock.advance(1);
        assert!(matches!(
            service.authenticate(&token).await,
            Err(AppError::Expired(_))
        ));
        assert!(matches!(service.logout(&token).await, Err(AppError::Expired(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let (service, _) = setup(3600).await;
        let err = service.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref m) if m == "password is incorrect"));
    }

    #[tokio::test]
    async fn test_login_unknown_user_not_found() {
        let (service, _) = setup(3600).await;
        let err = service.login("bob", "whatever").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "user not found"));
    }

    #[tokio::test]
    async fn test_authenticate_garbage_unauthorized() {
        let (service, _) = setup(3600).await;
        assert!(matches!(
            service.authenticate("garbage").await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.authenticate("").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_keeps_token_valid() {
        let (service, _) = setup(3600).await;
        let token = service.login("alice", "correct").await.unwrap();
        assert_eq!(service.logout(&token).await.unwrap(), "alice");
        // 无服务端吊销
        assert!(service.authenticate(&token).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_and_ensure_user() {
        let (service, _) = setup(3600).await;
        assert!(matches!(
            service.create_user("alice", "other").await,
            Err(AppError::Conflict(_))
        ));
        // 已存在时不覆盖密码
        service.ensure_user("alice", "other").await.unwrap();
        assert!(service.login("alice", "correct").await.is_ok());

        service.ensure_user("admin", "Admin123").await.unwrap();
        assert!(service.login("admin", "Admin123").await.is_ok());
    }
}
