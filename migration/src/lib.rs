pub use sea_orm_migration::prelude::*;

mod m20241001_000001_initial;
mod m20241001_000002_seed_citizenships;

pub use m20241001_000002_seed_citizenships::citizenship_rows;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_initial::Migration),
            Box::new(m20241001_000002_seed_citizenships::Migration),
        ]
    }
}
