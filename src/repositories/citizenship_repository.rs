use crate::entities::citizenship_entity as citizenships;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

#[derive(Clone)]
pub struct CitizenshipRepository {
    pool: DatabaseConnection,
}

impl CitizenshipRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<citizenships::Model>, DbErr> {
        citizenships::Entity::find()
            .order_by_asc(citizenships::Column::Id)
            .all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<citizenships::Model>, DbErr> {
        citizenships::Entity::find_by_id(id).one(&self.pool).await
    }

    pub async fn find_by_alpha3(&self, alpha3: &str) -> Result<Option<citizenships::Model>, DbErr> {
        citizenships::Entity::find()
            .filter(citizenships::Column::Alpha3.eq(alpha3))
            .one(&self.pool)
            .await
    }

    pub async fn find_by_nation(&self, nation: &str) -> Result<Option<citizenships::Model>, DbErr> {
        citizenships::Entity::find()
            .filter(citizenships::Column::Nation.eq(nation))
            .one(&self.pool)
            .await
    }
}
