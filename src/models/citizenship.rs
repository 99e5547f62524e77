use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::citizenship_entity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CitizenshipResponse {
    pub id: i32,
    #[schema(example = "Taiwan")]
    pub nation: String,
    #[schema(example = "TWN")]
    pub alpha3: String,
}

impl From<citizenship_entity::Model> for CitizenshipResponse {
    fn from(m: citizenship_entity::Model) -> Self {
        Self {
            id: m.id,
            nation: m.nation,
            alpha3: m.alpha3,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CitizenshipIdQuery {
    #[serde(rename = "CitizenshipId")]
    pub citizenship_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CitizenshipAlpha3Query {
    #[serde(rename = "Alpha3")]
    pub alpha3: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CitizenshipNationQuery {
    #[serde(rename = "CitizenshipName")]
    pub nation: String,
}
