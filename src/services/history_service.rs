use crate::entities::history_entity as histories;
use crate::error::{AppError, AppResult};
use crate::models::{HistoryRequest, HistoryResponse};
use crate::repositories::{CustomerRepository, HistoryRepository};
use crate::utils::{parse_date, parse_uuid};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use super::customer_service::CUSTOMER_NOT_FOUND;

pub const HISTORY_NOT_FOUND: &str = "There is no this history";
pub const HISTORY_INCOMPLETE: &str = "History Info is incomplete";

struct ValidHistory {
    customer_id: Uuid,
    date: NaiveDate,
    number_of_people: i32,
    price: i32,
    room: String,
    note: String,
}

fn incomplete(detail: &str) -> AppError {
    AppError::ValidationError(format!("{HISTORY_INCOMPLETE}: {detail}"))
}

fn customer_id_of(request: &HistoryRequest) -> AppResult<Uuid> {
    let raw = request.customer_id.trim();
    if raw.is_empty() {
        return Err(incomplete("CustomerId is required"));
    }
    parse_uuid("CustomerId", raw)
}

fn validate(request: &HistoryRequest, customer_id: Uuid) -> AppResult<ValidHistory> {
    if request.date.trim().is_empty() {
        return Err(incomplete("Date is required"));
    }
    let date = parse_date("Date", &request.date)?;
    if request.number_of_people <= 0 {
        return Err(incomplete("NumberOfPeople must be positive"));
    }
    if request.price <= 0 {
        return Err(incomplete("Price must be positive"));
    }
    Ok(ValidHistory {
        customer_id,
        date,
        number_of_people: request.number_of_people,
        price: request.price,
        room: request.room.trim().to_string(),
        note: request.note.clone(),
    })
}

fn to_responses(rows: Vec<histories::Model>) -> Vec<HistoryResponse> {
    rows.into_iter().map(Into::into).collect()
}

#[derive(Clone)]
pub struct HistoryService {
    histories: HistoryRepository,
    customers: CustomerRepository,
}

impl HistoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            histories: HistoryRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<HistoryResponse>> {
        Ok(to_responses(self.histories.list().await?))
    }

    /// 客户不存在 -> NotFound; 客户存在但没有记录 -> Empty
    pub async fn get_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<HistoryResponse>> {
        self.ensure_customer(customer_id).await?;
        let rows = self.histories.find_by_customer(customer_id).await?;
        if rows.is_empty() {
            return Err(AppError::Empty("There is not any history".to_string()));
        }
        Ok(to_responses(rows))
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> AppResult<Vec<HistoryResponse>> {
        let rows = self.histories.find_by_date(date).await?;
        if rows.is_empty() {
            return Err(AppError::Empty(format!("There was no customer in {date}")));
        }
        Ok(to_responses(rows))
    }

    /// 闭区间查询, start 不可晚于 end
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<HistoryResponse>> {
        if start > end {
            return Err(AppError::ValidationError(
                "StartDate must not be later than EndDate".to_string(),
            ));
        }
        let rows = self.histories.find_between(start, end).await?;
        if rows.is_empty() {
            return Err(AppError::Empty(format!(
                "There was no customer between {start} and {end}"
            )));
        }
        Ok(to_responses(rows))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<HistoryResponse> {
        self.histories
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(HISTORY_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, request: HistoryRequest) -> AppResult<HistoryResponse> {
        let customer_id = customer_id_of(&request)?;
        self.ensure_customer(customer_id).await?;
        let valid = validate(&request, customer_id)?;

        let model = histories::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(valid.customer_id),
            date: Set(valid.date),
            number_of_people: Set(valid.number_of_people),
            price: Set(valid.price),
            room: Set(valid.room),
            note: Set(valid.note),
        };
        let created = self
            .histories
            .create(model)
            .await
            .map_err(|e| AppError::from_db(e, "This history is already existed"))?;
        Ok(created.into())
    }

    pub async fn update(&self, request: HistoryRequest) -> AppResult<HistoryResponse> {
        let id = match request.history_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_uuid("HistoryId", raw)?,
            _ => return Err(incomplete("HistoryId is required")),
        };
        let customer_id = customer_id_of(&request)?;
        self.ensure_customer(customer_id).await?;
        if self.histories.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(HISTORY_NOT_FOUND.to_string()));
        }
        let valid = validate(&request, customer_id)?;

        let model = histories::ActiveModel {
            id: Set(id),
            customer_id: Set(valid.customer_id),
            date: Set(valid.date),
            number_of_people: Set(valid.number_of_people),
            price: Set(valid.price),
            room: Set(valid.room),
            note: Set(valid.note),
        };
        let updated = self
            .histories
            .update(model)
            .await
            .map_err(|e| AppError::from_db(e, "This history is already existed"))?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.histories.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(HISTORY_NOT_FOUND.to_string()));
        }
        self.histories.delete(id).await?;
        Ok(())
    }

    /// 删除某客户的全部记录, 没有记录不视为错误
    pub async fn delete_all_for_customer(&self, customer_id: Uuid) -> AppResult<u64> {
        Ok(self.histories.delete_all_for_customer(customer_id).await?)
    }

    async fn ensure_customer(&self, customer_id: Uuid) -> AppResult<()> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CustomerService;
    use crate::test_support::{customer_request, history_request, inmem_db};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn setup() -> (HistoryService, Uuid) {
        let db = inmem_db().await;
        let customer = CustomerService::new(db.clone())
            .create(customer_request("A123456789"))
            .await
            .unwrap();
        (HistoryService::new(db), customer.id)
    }

    #[tokio::test]
    async fn test_create_for_missing_customer_not_found() {
        let (service, _) = setup().await;
        let err = service.create(history_request(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_zero_party_or_price() {
        let (service, customer_id) = setup().await;

        let mut request = history_request(customer_id);
        request.number_of_people = 0;
        assert!(matches!(
            service.create(request).await,
            Err(AppError::ValidationError(_))
        ));

        let mut request = history_request(customer_id);
        request.price = 0;
        assert!(matches!(
            service.create(request).await,
            Err(AppError::ValidationError(_))
        ));

        let mut request = history_request(customer_id);
        request.date = String::new();
        assert!(matches!(
            service.create(request).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_get_by_customer_empty_then_found() {
        let (service, customer_id) = setup().await;

        assert!(matches!(
            service.get_by_customer(customer_id).await,
            Err(AppError::Empty(_))
        ));
        assert!(matches!(
            service.get_by_customer(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));

        let created = service.create(history_request(customer_id)).await.unwrap();
        let rows = service.get_by_customer(customer_id).await.unwrap();
        assert_eq!(rows, vec![created]);
    }

    #[tokio::test]
    async fn test_get_by_date_and_range() {
        let (service, customer_id) = setup().await;
        let mut first = history_request(customer_id);
        first.date = "2024-05-01".into();
        let mut second = history_request(customer_id);
        second.date = "2024-05-10".into();
        service.create(first).await.unwrap();
        service.create(second).await.unwrap();

        assert_eq!(service.get_by_date(date("2024-05-01")).await.unwrap().len(), 1);
        assert!(matches!(
            service.get_by_date(date("2024-06-01")).await,
            Err(AppError::Empty(_))
        ));

        let range = service
            .get_by_date_range(date("2024-05-01"), date("2024-05-10"))
            .await
            .unwrap();
        assert_eq!(range.len(), 2);
        assert!(range[0].date <= range[1].date);
        assert!(matches!(
            service
                .get_by_date_range(date("2024-05-10"), date("2024-05-01"))
                .await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, customer_id) = setup().await;
        let created = service.create(history_request(customer_id)).await.unwrap();

        let mut request = history_request(customer_id);
        request.history_id = Some(created.id.to_string());
        request.price = 4800;
        request.room = "502".into();
        let updated = service.update(request).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 4800);
        assert_eq!(updated.room, "502");

        let mut missing = history_request(customer_id);
        missing.history_id = Some(Uuid::new_v4().to_string());
        assert!(matches!(
            service.update(missing).await,
            Err(AppError::NotFound(_))
        ));

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_all_for_customer() {
        let (service, customer_id) = setup().await;
        assert_eq!(service.delete_all_for_customer(customer_id).await.unwrap(), 0);

        service.create(history_request(customer_id)).await.unwrap();
        service.create(history_request(customer_id)).await.unwrap();
        assert_eq!(service.delete_all_for_customer(customer_id).await.unwrap(), 2);
        assert!(service.list().await.unwrap().is_empty());
    }
}
