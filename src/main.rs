use actix_web::{App, HttpServer, middleware::Logger, web};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines

use crms_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers::{self, CookieSettings},
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

fn init_logger(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载配置 (日志级别取决于运行模式, 因此先于日志初始化)
    let config = Config::from_toml().map_err(|e| startup_error("Failed to load configuration", e))?;
    init_logger(config.server.is_debug());

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| startup_error("Failed to create database connection pool", e))?;

    // 运行数据库迁移 (含国籍参考数据)
    run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    // 创建JWT服务
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.token_expires_in);

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service);
    let customer_service = CustomerService::new(pool.clone());
    let history_service = HistoryService::new(pool.clone());
    let citizenship_service = CitizenshipService::new(pool.clone());

    if let Some(admin) = &config.admin {
        auth_service
            .ensure_user(&admin.username, &admin.password)
            .await
            .map_err(|e| startup_error("Failed to provision admin user", e))?;
    }

    let cookie_settings = CookieSettings {
        secure: config.server.cookie_secure,
    };
    let frontend_origin = config.server.frontend_origin.clone();

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{} ({} mode)",
        config.server.host,
        config.server.port,
        config.server.mode
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&frontend_origin))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(citizenship_service.clone()))
            .app_data(web::Data::new(cookie_settings))
            .app_data(handlers::json_config())
            .app_data(handlers::query_config())
            .configure(swagger_config)
            .service(web::scope("/api").configure(handlers::api_config))
    })
    .shutdown_timeout(5)
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
