//! 测试共用的数据库与请求构造工具

use crate::models::{CustomerRequest, HistoryRequest};
use crate::utils::Clock;
use chrono::{DateTime, Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Mutex;
use uuid::Uuid;

/// 内存 SQLite, 单连接以保证所有查询落在同一个库上
pub async fn inmem_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn customer_request(national_id: &str) -> CustomerRequest {
    CustomerRequest {
        customer_id: None,
        name: "Bob".to_string(),
        gender: "Male".to_string(),
        birthday: "1990-01-01".to_string(),
        national_id: national_id.to_string(),
        address: "No. 1, Main Rd".to_string(),
        phone_number: String::new(),
        car_number: String::new(),
        citizenship_id: 1,
        note: String::new(),
    }
}

pub fn history_request(customer_id: Uuid) -> HistoryRequest {
    HistoryRequest {
        history_id: None,
        customer_id: customer_id.to_string(),
        date: "2024-05-01".to_string(),
        number_of_people: 2,
        price: 3200,
        room: "301".to_string(),
        note: String::new(),
    }
}

/// 可手动推进的时钟
pub struct FakeClock(Mutex<DateTime<Utc>>);

impl Default for FakeClock {
    fn default() -> Self {
        Self(Mutex::new(Utc::now()))
    }
}

impl FakeClock {
    pub fn advance(&self, secs: i64) {
        let mut now = self.0.lock().unwrap();
        *now += Duration::seconds(secs);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}
