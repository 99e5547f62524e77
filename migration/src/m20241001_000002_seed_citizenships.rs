use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Citizenships {
    Table,
    Nation,
    Alpha3,
}

/// 随包分发的国籍数据 (`Nation,Alpha3`, 首行为表头)
const CITIZENSHIP_DATA: &str = include_str!("../data/citizenships.csv");

/// 解析国籍数据, 跳过表头与空行; alpha3 统一大写
pub fn citizenship_rows() -> Vec<(String, String)> {
    CITIZENSHIP_DATA
        .lines()
        .skip(1)
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let (nation, alpha3) = line.rsplit_once(',')?;
            Some((nation.trim().to_string(), alpha3.trim().to_uppercase()))
        })
        .collect()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始化国籍参考数据; 已存在的国家 (nation 冲突) 直接跳过
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let rows = citizenship_rows();
        if rows.is_empty() {
            return Ok(());
        }

        let mut insert = Query::insert();
        insert
            .into_table(Citizenships::Table)
            .columns([Citizenships::Nation, Citizenships::Alpha3])
            .on_conflict(
                OnConflict::column(Citizenships::Nation)
                    .do_nothing()
                    .to_owned(),
            );
        for (nation, alpha3) in rows {
            insert
                .values([nation.into(), alpha3.into()])
                .map_err(|e| DbErr::Custom(format!("Invalid citizenship row: {e}")))?;
        }

        manager.exec_stmt(insert).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Citizenships::Table).to_owned())
            .await?;
        Ok(())
    }
}
