use crate::entities::history_entity as histories;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct HistoryRepository {
    pool: DatabaseConnection,
}

impl HistoryRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<histories::Model>, DbErr> {
        histories::Entity::find()
            .order_by_asc(histories::Column::Date)
            .all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<histories::Model>, DbErr> {
        histories::Entity::find_by_id(id).one(&self.pool).await
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<histories::Model>, DbErr> {
        histories::Entity::find()
            .filter(histories::Column::CustomerId.eq(customer_id))
            .order_by_asc(histories::Column::Date)
            .all(&self.pool)
            .await
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<histories::Model>, DbErr> {
        histories::Entity::find()
            .filter(histories::Column::Date.eq(date))
            .all(&self.pool)
            .await
    }

    /// 闭区间 [start, end]
    pub async fn find_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<histories::Model>, DbErr> {
        histories::Entity::find()
            .filter(histories::Column::Date.between(start, end))
            .order_by_asc(histories::Column::Date)
            .all(&self.pool)
            .await
    }

    pub async fn create(&self, model: histories::ActiveModel) -> Result<histories::Model, DbErr> {
        model.insert(&self.pool).await
    }

    pub async fn update(&self, model: histories::ActiveModel) -> Result<histories::Model, DbErr> {
        model.update(&self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = histories::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected)
    }

    /// 可在事务中调用; 没有记录时返回 0
    pub async fn delete_by_customer<C: ConnectionTrait>(
        conn: &C,
        customer_id: Uuid,
    ) -> Result<u64, DbErr> {
        let result = histories::Entity::delete_many()
            .filter(histories::Column::CustomerId.eq(customer_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_all_for_customer(&self, customer_id: Uuid) -> Result<u64, DbErr> {
        Self::delete_by_customer(&self.pool, customer_id).await
    }
}
