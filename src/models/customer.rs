use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CitizenshipResponse, HistoryResponse};
use crate::entities::{Gender, citizenship_entity, customer_entity, history_entity};

/// 新增 / 修改客户的请求体
/// 兼容旧版前端字段: `ID` -> NationalId, `Citizenship` -> CitizenshipId
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CustomerRequest {
    #[serde(rename = "CustomerId", alias = "Id", default)]
    pub customer_id: Option<String>,
    #[serde(rename = "Name", default)]
    #[schema(example = "Bob")]
    pub name: String,
    #[serde(rename = "Gender", default)]
    #[schema(example = "Male")]
    pub gender: String,
    #[serde(rename = "Birthday", default)]
    #[schema(example = "1990-01-01")]
    pub birthday: String,
    #[serde(rename = "NationalId", alias = "ID", default)]
    #[schema(example = "A123456789")]
    pub national_id: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "PhoneNumber", default)]
    pub phone_number: String,
    #[serde(rename = "CarNumber", default)]
    pub car_number: String,
    #[serde(rename = "CitizenshipId", alias = "Citizenship", default)]
    #[schema(example = 1)]
    pub citizenship_id: i32,
    #[serde(rename = "Note", default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub national_id: String,
    pub address: String,
    pub phone_number: String,
    pub car_number: String,
    pub citizenship_id: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub citizenship: Option<CitizenshipResponse>,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub histories: Option<Vec<HistoryResponse>>,
}

impl From<customer_entity::Model> for CustomerResponse {
    fn from(m: customer_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            gender: m.gender,
            birthday: m.birthday,
            national_id: m.national_id,
            address: m.address,
            phone_number: m.phone_number,
            car_number: m.car_number,
            citizenship_id: m.citizenship_id,
            citizenship: None,
            note: m.note,
            histories: None,
        }
    }
}

impl CustomerResponse {
    pub fn with_citizenship(mut self, citizenship: Option<citizenship_entity::Model>) -> Self {
        self.citizenship = citizenship.map(Into::into);
        self
    }

    pub fn with_histories(mut self, histories: Vec<history_entity::Model>) -> Self {
        self.histories = Some(histories.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NationalIdQuery {
    #[serde(rename = "ID", alias = "NationalId")]
    pub national_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerIdQuery {
    #[serde(rename = "CustomerId")]
    pub customer_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerNameQuery {
    #[serde(rename = "CustomerName", alias = "Name")]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerPhoneQuery {
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
}
