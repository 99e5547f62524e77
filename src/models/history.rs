use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::history_entity;

/// 新增 / 修改入住记录的请求体; 修改时需带 HistoryId
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HistoryRequest {
    #[serde(rename = "HistoryId", alias = "Id", default)]
    pub history_id: Option<String>,
    #[serde(rename = "CustomerId", default)]
    pub customer_id: String,
    #[serde(rename = "Date", default)]
    #[schema(example = "2024-05-01")]
    pub date: String,
    #[serde(rename = "NumberOfPeople", default)]
    #[schema(example = 2)]
    pub number_of_people: i32,
    #[serde(rename = "Price", default)]
    #[schema(example = 3200)]
    pub price: i32,
    #[serde(rename = "Room", default)]
    #[schema(example = "301")]
    pub room: String,
    #[serde(rename = "Note", default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub number_of_people: i32,
    pub price: i32,
    pub room: String,
    pub note: String,
}

impl From<history_entity::Model> for HistoryResponse {
    fn from(m: history_entity::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            date: m.date,
            number_of_people: m.number_of_people,
            price: m.price,
            room: m.room,
            note: m.note,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryIdQuery {
    #[serde(rename = "HistoryId")]
    pub history_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryDateQuery {
    #[serde(rename = "Date")]
    pub date: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryDuringQuery {
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
}
