use actix_web::{HttpResponse, ResponseError, Result, web};
use crate::models::*;
use crate::services::CustomerService;
use crate::utils::parse_uuid;

#[utoipa::path(
    get,
    path = "/customerList",
    tag = "customer",
    responses(
        (status = 200, description = "客户列表", body = [CustomerResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn list_customers(service: web::Data<CustomerService>) -> Result<HttpResponse> {
    match service.list().await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customer",
    tag = "customer",
    params(
        ("ID" = String, Query, description = "身份证号", example = "A123456789")
    ),
    responses(
        (status = 200, description = "客户详情 (不存在时返回 Message)", body = CustomerResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_customer(
    service: web::Data<CustomerService>,
    query: web::Query<NationalIdQuery>,
) -> Result<HttpResponse> {
    match service.get_by_national_id(&query.national_id).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(customer)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customerId",
    tag = "customer",
    params(
        ("CustomerId" = String, Query, description = "客户ID (uuid)")
    ),
    responses(
        (status = 200, description = "客户详情 (不存在时返回 Message)", body = CustomerResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_customer_by_id(
    service: web::Data<CustomerService>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse> {
    let id = match parse_uuid("CustomerId", &query.customer_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service.get_by_id(id).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(customer)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customerName",
    tag = "customer",
    params(
        ("CustomerName" = String, Query, description = "姓名关键字")
    ),
    responses(
        (status = 200, description = "姓名包含关键字的客户", body = [CustomerResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_customers_by_name(
    service: web::Data<CustomerService>,
    query: web::Query<CustomerNameQuery>,
) -> Result<HttpResponse> {
    match service.list_by_name(&query.name).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customerPhone",
    tag = "customer",
    params(
        ("PhoneNumber" = String, Query, description = "电话关键字")
    ),
    responses(
        (status = 200, description = "电话包含关键字的客户", body = [CustomerResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_customers_by_phone(
    service: web::Data<CustomerService>,
    query: web::Query<CustomerPhoneQuery>,
) -> Result<HttpResponse> {
    match service.list_by_phone(&query.phone_number).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/customerCitizenship",
    tag = "customer",
    params(
        ("CitizenshipId" = i32, Query, description = "国籍ID")
    ),
    responses(
        (status = 200, description = "该国籍的客户", body = [CustomerResponse]),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn get_customers_by_citizenship(
    service: web::Data<CustomerService>,
    query: web::Query<CitizenshipIdQuery>,
) -> Result<HttpResponse> {
    match service.list_by_citizenship(query.citizenship_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/customer",
    tag = "customer",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "创建成功", body = CustomerResponse),
        (status = 200, description = "已存在或信息不完整", body = ApiError),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn create_customer(
    service: web::Data<CustomerService>,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Created().json(customer)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/customer",
    tag = "customer",
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "修改成功, 或客户不存在 / 信息不完整时返回 Message", body = CustomerResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn update_customer(
    service: web::Data<CustomerService>,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse> {
    match service.update(request.into_inner()).await {
        Ok(customer) => Ok(HttpResponse::Ok().json(customer)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/customer",
    tag = "customer",
    params(
        ("CustomerId" = String, Query, description = "客户ID (uuid)")
    ),
    responses(
        (status = 200, description = "删除成功 (连同入住记录), 或客户不存在", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = ApiError)
    )
)]
pub async fn delete_customer(
    service: web::Data<CustomerService>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse> {
    let id = match parse_uuid("CustomerId", &query.customer_id) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Delete success"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn customer_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/customerList", web::get().to(list_customers))
        .route("/customerId", web::get().to(get_customer_by_id))
        .route("/customerName", web::get().to(get_customers_by_name))
        .route("/customerPhone", web::get().to(get_customers_by_phone))
        .route("/customerCitizenship", web::get().to(get_customers_by_citizenship))
        .service(
            web::resource("/customer")
                .route(web::get().to(get_customer))
                .route(web::post().to(create_customer))
                .route(web::put().to(update_customer))
                .route(web::delete().to(delete_customer)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{history_config, json_config, query_config};
    use crate::services::HistoryService;
    use crate::test_support::inmem_db;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn bob() -> Value {
        json!({
            "Name": "Bob",
            "Gender": "Male",
            "Birthday": "1990-01-01",
            "ID": "A123456789",
            "Address": "No. 1, Main Rd",
            "Citizenship": 1
        })
    }

    #[actix_web::test]
    async fn test_create_then_duplicate_is_soft_conflict() {
        let db = inmem_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(CustomerService::new(db)))
                .app_data(json_config())
                .app_data(query_config())
                .service(web::scope("/api").configure(customer_config)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/customer").set_json(bob()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["NationalId"], "A123456789");
        assert_eq!(created["CitizenshipId"], 1);
        assert_eq!(created["Citizenship"]["Id"], 1);

        let req = test::TestRequest::post().uri("/api/customer").set_json(bob()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["Message"], "This customer is already existed");

        let req = test::TestRequest::get().uri("/api/customer?ID=A123456789").to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found["Id"], created["Id"]);
        assert_eq!(found["Histories"], json!([]));

        let req = test::TestRequest::get().uri("/api/customerList").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn test_incomplete_and_missing_are_soft() {
        let db = inmem_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(CustomerService::new(db)))
                .app_data(json_config())
                .app_data(query_config())
                .service(web::scope("/api").configure(customer_config)),
        )
        .await;

        let mut body = bob();
        body["Name"] = json!("");
        let req = test::TestRequest::post().uri("/api/customer").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let req = test::TestRequest::get().uri("/api/customer?ID=NOPE").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["Message"], "There is no this customer");

        let req = test::TestRequest::get().uri("/api/customerId?CustomerId=not-a-uuid").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_malformed_requests_are_bad_request() {
        let db = inmem_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(CustomerService::new(db)))
                .app_data(json_config())
                .app_data(query_config())
                .service(web::scope("/api").configure(customer_config)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/customer")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/customerId").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_customer_removes_histories() {
        let db = inmem_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(CustomerService::new(db.clone())))
                .app_data(web::Data::new(HistoryService::new(db)))
                .app_data(json_config())
                .app_data(query_config())
                .service(
                    web::scope("/api")
                        .configure(customer_config)
                        .configure(history_config),
                ),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/customer").set_json(bob()).to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let customer_id = created["Id"].as_str().unwrap_or_default().to_string();

        let history = json!({
            "CustomerId": customer_id,
            "Date": "2024-05-01",
            "NumberOfPeople": 2,
            "Price": 3200,
            "Room": "301"
        });
        let req = test::TestRequest::post().uri("/api/history").set_json(history).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/customer?CustomerId={customer_id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["Message"], "Delete success");

        let req = test::TestRequest::get().uri("/api/historyList").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list, json!([]));

        let req = test::TestRequest::get()
            .uri(&format!("/api/historyCustomerId?CustomerId={customer_id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
