use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::Gender;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    handlers::user::TOKEN_COOKIE,
                ))),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customer::list_customers,
        handlers::customer::get_customer,
        handlers::customer::get_customer_by_id,
        handlers::customer::get_customers_by_name,
        handlers::customer::get_customers_by_phone,
        handlers::customer::get_customers_by_citizenship,
        handlers::customer::create_customer,
        handlers::customer::update_customer,
        handlers::customer::delete_customer,
        handlers::history::list_histories,
        handlers::history::get_history,
        handlers::history::get_histories_by_customer,
        handlers::history::get_histories_by_date,
        handlers::history::get_histories_during,
        handlers::history::create_history,
        handlers::history::update_history,
        handlers::history::delete_history,
        handlers::citizenship::list_citizenships,
        handlers::citizenship::get_citizenship_by_id,
        handlers::citizenship::get_citizenship_by_alpha3,
        handlers::citizenship::get_citizenship_by_nation,
        handlers::user::login,
        handlers::user::authentication,
        handlers::user::logout,
    ),
    components(
        schemas(
            Gender,
            CustomerRequest,
            CustomerResponse,
            HistoryRequest,
            HistoryResponse,
            CitizenshipResponse,
            LoginRequest,
            LoginResponse,
            TokenRequest,
            AuthenticationResponse,
            MessageResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "customer", description = "Customer management API"),
        (name = "history", description = "Stay history API"),
        (name = "citizenship", description = "Citizenship reference data API"),
        (name = "user", description = "Login session API"),
    ),
    info(
        title = "CRMS Backend API",
        version = "1.0.0",
        description = "Customer relationship management REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
