use crate::entities::{
    citizenship_entity as citizenships, customer_entity as customers,
    history_entity as histories,
};
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use super::HistoryRepository;

pub type CustomerWithCitizenship = (customers::Model, Option<citizenships::Model>);

/// 客户及其国籍 / 入住记录
pub struct CustomerDetail {
    pub customer: customers::Model,
    pub citizenship: Option<citizenships::Model>,
    pub histories: Vec<histories::Model>,
}

/// 区分大小写的子串匹配; SQLite 的 LIKE 对 ASCII 不区分大小写, 改用 instr
fn contains_case_sensitive(
    backend: DbBackend,
    column: customers::Column,
    needle: &str,
) -> SimpleExpr {
    match backend {
        DbBackend::Sqlite => Expr::expr(
            Func::cust(Alias::new("instr"))
                .arg(Expr::col((customers::Entity, column)))
                .arg(needle),
        )
        .gt(0),
        _ => column.contains(needle),
    }
}

#[derive(Clone)]
pub struct CustomerRepository {
    pool: DatabaseConnection,
}

impl CustomerRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<CustomerWithCitizenship>, DbErr> {
        customers::Entity::find()
            .find_also_related(citizenships::Entity)
            .order_by_asc(customers::Column::Name)
            .all(&self.pool)
            .await
    }

    pub async fn list_by_citizenship(
        &self,
        citizenship_id: i32,
    ) -> Result<Vec<CustomerWithCitizenship>, DbErr> {
        customers::Entity::find()
            .filter(customers::Column::CitizenshipId.eq(citizenship_id))
            .find_also_related(citizenships::Entity)
            .order_by_asc(customers::Column::Name)
            .all(&self.pool)
            .await
    }

    pub async fn list_by_name(&self, name: &str) -> Result<Vec<CustomerWithCitizenship>, DbErr> {
        let backend = self.pool.get_database_backend();
        customers::Entity::find()
            .filter(contains_case_sensitive(backend, customers::Column::Name, name))
            .find_also_related(citizenships::Entity)
            .order_by_asc(customers::Column::Name)
            .all(&self.pool)
            .await
    }

    pub async fn list_by_phone(&self, phone: &str) -> Result<Vec<CustomerWithCitizenship>, DbErr> {
        let backend = self.pool.get_database_backend();
        customers::Entity::find()
            .filter(contains_case_sensitive(backend, customers::Column::PhoneNumber, phone))
            .find_also_related(citizenships::Entity)
            .order_by_asc(customers::Column::Name)
            .all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find_by_id(id).one(&self.pool).await
    }

    pub async fn find_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find()
            .filter(customers::Column::NationalId.eq(national_id))
            .one(&self.pool)
            .await
    }

    pub async fn find_with_citizenship(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomerWithCitizenship>, DbErr> {
        customers::Entity::find_by_id(id)
            .find_also_related(citizenships::Entity)
            .one(&self.pool)
            .await
    }

    /// 加载国籍与全部入住记录
    pub async fn load_detail(&self, customer: customers::Model) -> Result<CustomerDetail, DbErr> {
        let citizenship = customer
            .find_related(citizenships::Entity)
            .one(&self.pool)
            .await?;
        let histories = customer
            .find_related(histories::Entity)
            .order_by_asc(histories::Column::Date)
            .all(&self.pool)
            .await?;
        Ok(CustomerDetail {
            customer,
            citizenship,
            histories,
        })
    }

    pub async fn create(&self, model: customers::ActiveModel) -> Result<customers::Model, DbErr> {
        model.insert(&self.pool).await
    }

    pub async fn update(&self, model: customers::ActiveModel) -> Result<customers::Model, DbErr> {
        model.update(&self.pool).await
    }

    /// 在同一事务中先删除该客户的全部入住记录, 再删除客户本身; 任一步失败整体回滚.
    /// 客户已不存在时返回 `None` (事务同样回滚)
    pub async fn delete_with_histories(&self, id: Uuid) -> Result<Option<u64>, DbErr> {
        let txn = self.pool.begin().await?;

        let removed = HistoryRepository::delete_by_customer(&txn, id).await?;
        let result = customers::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;
        log::info!("Deleted customer {id} together with {removed} histories");
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CustomerService, HistoryService};
    use crate::test_support::{customer_request, history_request, inmem_db};

    #[tokio::test]
    async fn test_name_and_phone_filters_are_case_sensitive() {
        let db = inmem_db().await;
        let mut request = customer_request("A1");
        request.phone_number = "09ab-1234".into();
        CustomerService::new(db.clone()).create(request).await.unwrap();
        let repo = CustomerRepository::new(db);

        assert_eq!(repo.list_by_name("Bo").await.unwrap().len(), 1);
        assert!(repo.list_by_name("bob").await.unwrap().is_empty());
        assert!(repo.list_by_name("BOB").await.unwrap().is_empty());
        assert_eq!(repo.list_by_phone("ab-12").await.unwrap().len(), 1);
        assert!(repo.list_by_phone("AB-12").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_customer_returns_none() {
        let db = inmem_db().await;
        let bob = CustomerService::new(db.clone())
            .create(customer_request("A1"))
            .await
            .unwrap();
        HistoryService::new(db.clone())
            .create(history_request(bob.id))
            .await
            .unwrap();
        let repo = CustomerRepository::new(db.clone());

        assert_eq!(repo.delete_with_histories(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(repo.delete_with_histories(bob.id).await.unwrap(), Some(1));
        assert_eq!(repo.delete_with_histories(bob.id).await.unwrap(), None);
    }
}
