use actix_web::{HttpResponse, ResponseError, Result, web};
use crate::models::*;
use crate::services::HistoryService;
use crate::utils::{parse_date, parse_uuid};

#[utoipa::path(
    get,
    path = "/historyList",
    tag = "history",
    responses(
        (status = 200, description = "全部入住记录", body = [HistoryResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn list_histories(service: web::Data<HistoryService>) -> Result<HttpResponse> {
    match service.list().await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(
        ("HistoryId" = String, Query, description = "记录ID (uuid)")
    ),
    responses(
        (status = 200, description = "记录详情 (不存在时返回 Message)", body = HistoryResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_history(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryIdQuery>,
) -> Result<HttpResponse> {
    let id = match parse_uuid("HistoryId", &query.history_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service.get_by_id(id).await {
        Ok(history) => Ok(HttpResponse::Ok().json(history)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/historyCustomerId",
    tag = "history",
    params(
        ("CustomerId" = String, Query, description = "客户ID (uuid)")
    ),
    responses(
        (status = 200, description = "该客户的入住记录; 客户不存在或无记录时返回 Message", body = [HistoryResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_histories_by_customer(
    service: web::Data<HistoryService>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse> {
    let id = match parse_uuid("CustomerId", &query.customer_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service.get_by_customer(id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/historyForDate",
    tag = "history",
    params(
        ("Date" = String, Query, description = "日期 YYYY-MM-DD", example = "2024-05-01")
    ),
    responses(
        (status = 200, description = "当日入住记录; 无记录时返回 Message", body = [HistoryResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_histories_by_date(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryDateQuery>,
) -> Result<HttpResponse> {
    let date = match parse_date("Date", &query.date) {
        Ok(date) => date,
        Err(e) => return Ok(e.error_response()),
    };
    match service.get_by_date(date).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/historyForDuring",
    tag = "history",
    params(
        ("StartDate" = String, Query, description = "开始日期 YYYY-MM-DD (含)"),
        ("EndDate" = String, Query, description = "结束日期 YYYY-MM-DD (含)")
    ),
    responses(
        (status = 200, description = "区间内的入住记录; 无记录时返回 Message", body = [HistoryResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_histories_during(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryDuringQuery>,
) -> Result<HttpResponse> {
    let range = parse_date("StartDate", &query.start_date)
        .and_then(|start| Ok((start, parse_date("EndDate", &query.end_date)?)));
    let (start, end) = match range {
        Ok(range) => range,
        Err(e) => return Ok(e.error_response()),
    };
    match service.get_by_date_range(start, end).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/history",
    tag = "history",
    request_body = HistoryRequest,
    responses(
        (status = 201, description = "创建成功", body = HistoryResponse),
        (status = 200, description = "客户不存在或信息不完整", body = ApiError),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn create_history(
    service: web::Data<HistoryService>,
    request: web::Json<HistoryRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(history) => Ok(HttpResponse::Created().json(history)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/history",
    tag = "history",
    request_body = HistoryRequest,
    responses(
        (status = 200, description = "修改成功, 或记录不存在 / 信息不完整时返回 Message", body = HistoryResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn update_history(
    service: web::Data<HistoryService>,
    request: web::Json<HistoryRequest>,
) -> Result<HttpResponse> {
    match service.update(request.into_inner()).await {
        Ok(history) => Ok(HttpResponse::Ok().json(history)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/history",
    tag = "history",
    params(
        ("HistoryId" = String, Query, description = "记录ID (uuid)")
    ),
    responses(
        (status = 200, description = "删除成功, 或记录不存在", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn delete_history(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryIdQuery>,
) -> Result<HttpResponse> {
    let id = match parse_uuid("HistoryId", &query.history_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Delete success"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn history_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/historyList", web::get().to(list_histories))
        .route("/historyCustomerId", web::get().to(get_histories_by_customer))
        .route("/historyForDate", web::get().to(get_histories_by_date))
        .route("/historyForDuring", web::get().to(get_histories_during))
        .service(
            web::resource("/history")
                .route(web::get().to(get_history))
                .route(web::post().to(create_history))
                .route(web::put().to(update_history))
                .route(web::delete().to(delete_history)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::query_config;
    use crate::services::CustomerService;
    use crate::test_support::{customer_request, history_request, inmem_db};
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_date_queries() {
        let db = inmem_db().await;
        let customer = CustomerService::new(db.clone())
            .create(customer_request("A123456789"))
            .await
            .unwrap();
        let service = HistoryService::new(db);
        service.create(history_request(customer.id)).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .app_data(query_config())
                .service(web::scope("/api").configure(history_config)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/historyForDate?Date=2024-05-01").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["Room"], "301");
        assert_eq!(body[0]["CustomerId"], customer.id.to_string());

        let req = test::TestRequest::get().uri("/api/historyForDate?Date=2024-06-01").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], "EMPTY");

        let req = test::TestRequest::get().uri("/api/historyForDate?Date=05/01/2024").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let req = test::TestRequest::get()
            .uri("/api/historyForDuring?StartDate=2024-04-01&EndDate=2024-05-31")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::get()
            .uri("/api/historyForDuring?StartDate=2024-05-31&EndDate=2024-04-01")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
