use crate::error::{AppError, AppResult};
use crate::models::CitizenshipResponse;
use crate::repositories::CitizenshipRepository;
use sea_orm::DatabaseConnection;

const CITIZENSHIP_NOT_FOUND: &str = "There is no this citizenship";

#[derive(Clone)]
pub struct CitizenshipService {
    citizenships: CitizenshipRepository,
}

impl CitizenshipService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            citizenships: CitizenshipRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<CitizenshipResponse>> {
        let rows = self.citizenships.list().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<CitizenshipResponse> {
        self.citizenships
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(CITIZENSHIP_NOT_FOUND.to_string()))
    }

    /// alpha3 入库时为大写, 查询前统一转换
    pub async fn get_by_alpha3(&self, alpha3: &str) -> AppResult<CitizenshipResponse> {
        let code = alpha3.trim().to_uppercase();
        if code.len() != 3 {
            return Err(AppError::ValidationError(
                "Alpha3 must be a 3-letter code".to_string(),
            ));
        }
        self.citizenships
            .find_by_alpha3(&code)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(CITIZENSHIP_NOT_FOUND.to_string()))
    }

    pub async fn get_by_nation(&self, nation: &str) -> AppResult<CitizenshipResponse> {
        self.citizenships
            .find_by_nation(nation.trim())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(CITIZENSHIP_NOT_FOUND.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::inmem_db;

    #[tokio::test]
    async fn test_seeded_citizenships() {
        let service = CitizenshipService::new(inmem_db().await);

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), migration::citizenship_rows().len());

        let taiwan = service.get_by_alpha3("twn").await.unwrap();
        assert_eq!(taiwan.nation, "Taiwan");
        assert_eq!(service.get_by_nation("Taiwan").await.unwrap(), taiwan);
        assert_eq!(service.get_by_id(taiwan.id).await.unwrap(), taiwan);
    }

    #[tokio::test]
    async fn test_unknown_citizenship() {
        let service = CitizenshipService::new(inmem_db().await);
        assert!(matches!(service.get_by_id(0).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.get_by_alpha3("XXX").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.get_by_alpha3("TOOLONG").await,
            Err(AppError::ValidationError(_))
        ));
    }
}
