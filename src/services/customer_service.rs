use crate::entities::{Gender, customer_entity as customers};
use crate::error::{AppError, AppResult};
use crate::models::{CustomerRequest, CustomerResponse};
use crate::repositories::{CitizenshipRepository, CustomerRepository, CustomerWithCitizenship};
use crate::utils::{parse_date, parse_uuid};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

pub const CUSTOMER_NOT_FOUND: &str = "There is no this customer";
pub const CUSTOMER_EXISTED: &str = "This customer is already existed";
pub const CUSTOMER_INCOMPLETE: &str = "Customer Info is incomplete";

/// 通过校验后的客户字段
#[derive(Debug, Clone)]
struct ValidCustomer {
    name: String,
    gender: Gender,
    birthday: NaiveDate,
    national_id: String,
    address: String,
    phone_number: String,
    car_number: String,
    citizenship_id: i32,
    note: String,
}

fn incomplete(detail: &str) -> AppError {
    AppError::ValidationError(format!("{CUSTOMER_INCOMPLETE}: {detail}"))
}

/// 必填: 姓名、性别 (Male/Female)、生日、身份证号、国籍
fn validate(request: &CustomerRequest) -> AppResult<ValidCustomer> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(incomplete("Name is required"));
    }
    let gender: Gender = request
        .gender
        .trim()
        .parse()
        .map_err(|_| incomplete("Gender must be Male or Female"))?;
    if request.birthday.trim().is_empty() {
        return Err(incomplete("Birthday is required"));
    }
    let birthday = parse_date("Birthday", &request.birthday)?;
    let national_id = request.national_id.trim();
    if national_id.is_empty() {
        return Err(incomplete("NationalId is required"));
    }
    if request.citizenship_id <= 0 {
        return Err(incomplete("CitizenshipId is required"));
    }

    Ok(ValidCustomer {
        name: name.to_string(),
        gender,
        birthday,
        national_id: national_id.to_string(),
        address: request.address.trim().to_string(),
        phone_number: request.phone_number.trim().to_string(),
        car_number: request.car_number.trim().to_string(),
        citizenship_id: request.citizenship_id,
        note: request.note.clone(),
    })
}

fn to_response((customer, citizenship): CustomerWithCitizenship) -> CustomerResponse {
    CustomerResponse::from(customer).with_citizenship(citizenship)
}

#[derive(Clone)]
pub struct CustomerService {
    customers: CustomerRepository,
    citizenships: CitizenshipRepository,
}

impl CustomerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            citizenships: CitizenshipRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<CustomerResponse>> {
        let rows = self.customers.list().await?;
        Ok(rows.into_iter().map(to_response).collect())
    }

    pub async fn list_by_citizenship(&self, citizenship_id: i32) -> AppResult<Vec<CustomerResponse>> {
        let rows = self.customers.list_by_citizenship(citizenship_id).await?;
        Ok(rows.into_iter().map(to_response).collect())
    }

    pub async fn list_by_name(&self, name: &str) -> AppResult<Vec<CustomerResponse>> {
        let rows = self.customers.list_by_name(name).await?;
        Ok(rows.into_iter().map(to_response).collect())
    }

    pub async fn list_by_phone(&self, phone: &str) -> AppResult<Vec<CustomerResponse>> {
        let rows = self.customers.list_by_phone(phone).await?;
        Ok(rows.into_iter().map(to_response).collect())
    }

    /// 按身份证号查询, 附带国籍与入住记录
    pub async fn get_by_national_id(&self, national_id: &str) -> AppResult<CustomerResponse> {
        let customer = self
            .customers
            .find_by_national_id(national_id.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()))?;
        self.detail(customer).await
    }

    /// 按客户 ID 查询, 附带国籍与入住记录
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<CustomerResponse> {
        let customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()))?;
        self.detail(customer).await
    }

    pub async fn create(&self, request: CustomerRequest) -> AppResult<CustomerResponse> {
        let valid = validate(&request)?;
        self.ensure_citizenship(valid.citizenship_id).await?;

        if self
            .customers
            .find_by_national_id(&valid.national_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(CUSTOMER_EXISTED.to_string()));
        }

        let id = Uuid::new_v4();
        let model = customers::ActiveModel {
            id: Set(id),
            name: Set(valid.name),
            gender: Set(valid.gender),
            birthday: Set(valid.birthday),
            national_id: Set(valid.national_id),
            address: Set(valid.address),
            phone_number: Set(valid.phone_number),
            car_number: Set(valid.car_number),
            citizenship_id: Set(valid.citizenship_id),
            note: Set(valid.note),
        };
        // 并发插入同一身份证号时由唯一索引兜底
        self.customers
            .create(model)
            .await
            .map_err(|e| AppError::from_db(e, CUSTOMER_EXISTED))?;

        log::info!("Created customer {id}");
        self.refreshed(id).await
    }

    /// 整条记录替换 (除 ID 外全部可变字段)
    pub async fn update(&self, request: CustomerRequest) -> AppResult<CustomerResponse> {
        let id = match request.customer_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_uuid("CustomerId", raw)?,
            _ => return Err(incomplete("CustomerId is required")),
        };
        let valid = validate(&request)?;

        let existing = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()))?;
        self.ensure_citizenship(valid.citizenship_id).await?;

        if let Some(other) = self.customers.find_by_national_id(&valid.national_id).await?
            && other.id != existing.id
        {
            return Err(AppError::Conflict(CUSTOMER_EXISTED.to_string()));
        }

        let model = customers::ActiveModel {
            id: Set(existing.id),
            name: Set(valid.name),
            gender: Set(valid.gender),
            birthday: Set(valid.birthday),
            national_id: Set(valid.national_id),
            address: Set(valid.address),
            phone_number: Set(valid.phone_number),
            car_number: Set(valid.car_number),
            citizenship_id: Set(valid.citizenship_id),
            note: Set(valid.note),
        };
        self.customers
            .update(model)
            .await
            .map_err(|e| AppError::from_db(e, CUSTOMER_EXISTED))?;

        self.refreshed(id).await
    }

    /// 删除客户及其全部入住记录 (单一事务)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.customers.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()));
        }
        // 并发删除时行可能已不存在
        match self.customers.delete_with_histories(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(CUSTOMER_NOT_FOUND.to_string())),
        }
    }

    async fn ensure_citizenship(&self, citizenship_id: i32) -> AppResult<()> {
        if self.citizenships.find_by_id(citizenship_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "There is no citizenship with id {citizenship_id}"
            )));
        }
        Ok(())
    }

    async fn refreshed(&self, id: Uuid) -> AppResult<CustomerResponse> {
        let row = self
            .customers
            .find_with_citizenship(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CUSTOMER_NOT_FOUND.to_string()))?;
        Ok(to_response(row))
    }

    async fn detail(&self, customer: customers::Model) -> AppResult<CustomerResponse> {
        let detail = self.customers.load_detail(customer).await?;
        Ok(CustomerResponse::from(detail.customer)
            .with_citizenship(detail.citizenship)
            .with_histories(detail.histories))
    }
}
