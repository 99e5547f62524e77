use actix_cors::Cors;

/// `frontend_origin` 为 "*" 时接受任意来源 (回显 Origin 以便携带 cookie)
pub fn create_cors(frontend_origin: &str) -> Cors {
    let cors = if frontend_origin.trim() == "*" {
        Cors::default().allowed_origin_fn(|_, _req_head| true)
    } else {
        Cors::default().allowed_origin(frontend_origin.trim())
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        // 登录令牌通过 cookie 传递
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn test_configured_origin_allowed() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors("http://localhost:5173"))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|v| v.to_str().ok()),
            Some("true")
        );
    }

    #[actix_web::test]
    async fn test_wildcard_echoes_origin() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors("*"))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "https://crm.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
            Some("https://crm.example.com")
        );
    }
}
