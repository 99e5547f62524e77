use crate::entities::user_entity as users;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

#[derive(Clone)]
pub struct UserRepository {
    pool: DatabaseConnection,
}

impl UserRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.pool)
            .await
    }

    pub async fn create(&self, model: users::ActiveModel) -> Result<users::Model, DbErr> {
        model.insert(&self.pool).await
    }
}
