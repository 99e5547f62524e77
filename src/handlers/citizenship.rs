use actix_web::{HttpResponse, ResponseError, Result, web};
use crate::models::*;
use crate::services::CitizenshipService;

#[utoipa::path(
    get,
    path = "/citizenships",
    tag = "citizenship",
    responses(
        (status = 200, description = "全部国籍", body = [CitizenshipResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn list_citizenships(service: web::Data<CitizenshipService>) -> Result<HttpResponse> {
    match service.list().await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/citizenshipId",
    tag = "citizenship",
    params(
        ("CitizenshipId" = i32, Query, description = "国籍ID")
    ),
    responses(
        (status = 200, description = "国籍详情 (不存在时返回 Message)", body = CitizenshipResponse)
    )
)]
pub async fn get_citizenship_by_id(
    service: web::Data<CitizenshipService>,
    query: web::Query<CitizenshipIdQuery>,
) -> Result<HttpResponse> {
    match service.get_by_id(query.citizenship_id).await {
        Ok(c) => Ok(HttpResponse::Ok().json(c)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/citizenshipAlpha3",
    tag = "citizenship",
    params(
        ("Alpha3" = String, Query, description = "ISO alpha-3 代码", example = "TWN")
    ),
    responses(
        (status = 200, description = "国籍详情 (不存在时返回 Message)", body = CitizenshipResponse)
    )
)]
pub async fn get_citizenship_by_alpha3(
    service: web::Data<CitizenshipService>,
    query: web::Query<CitizenshipAlpha3Query>,
) -> Result<HttpResponse> {
    match service.get_by_alpha3(&query.alpha3).await {
        Ok(c) => Ok(HttpResponse::Ok().json(c)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/citizenshipNation",
    tag = "citizenship",
    params(
        ("CitizenshipName" = String, Query, description = "国家名称", example = "Taiwan")
    ),
    responses(
        (status = 200, description = "国籍详情 (不存在时返回 Message)", body = CitizenshipResponse)
    )
)]
pub async fn get_citizenship_by_nation(
    service: web::Data<CitizenshipService>,
    query: web::Query<CitizenshipNationQuery>,
) -> Result<HttpResponse> {
    match service.get_by_nation(&query.nation).await {
        Ok(c) => Ok(HttpResponse::Ok().json(c)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn citizenship_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/citizenships", web::get().to(list_citizenships))
        .route("/citizenshipId", web::get().to(get_citizenship_by_id))
        .route("/citizenshipAlpha3", web::get().to(get_citizenship_by_alpha3))
        .route("/citizenshipNation", web::get().to(get_citizenship_by_nation));
}
