use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Citizenships {
    Table,
    Id,
    Nation,
    Alpha3,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Name,
    Gender,
    Birthday,
    NationalId,
    Address,
    PhoneNumber,
    CarNumber,
    CitizenshipId,
    Note,
}

#[derive(DeriveIden)]
enum Histories {
    Table,
    Id,
    CustomerId,
    Date,
    NumberOfPeople,
    Price,
    Room,
    Note,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始表结构:
/// - citizenships: 国籍参考表 (nation / alpha3 均唯一)
/// - customers: 客户, national_id 唯一, citizenship_id 外键
/// - histories: 入住记录, customer_id 外键 (ON DELETE CASCADE 兜底, 业务层仍在事务中级联删除)
/// - users: 后台账号, 仅保存 bcrypt 哈希
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Citizenships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Citizenships::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Citizenships::Nation)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Citizenships::Alpha3)
                            .string_len(3)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Customers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::Gender).string_len(6).not_null())
                    .col(ColumnDef::new(Customers::Birthday).date().not_null())
                    .col(
                        ColumnDef::new(Customers::NationalId)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::Address)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Customers::PhoneNumber)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Customers::CarNumber)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Customers::CitizenshipId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Customers::Note).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customers_citizenship")
                            .from(Customers::Table, Customers::CitizenshipId)
                            .to(Citizenships::Table, Citizenships::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customers_birthday")
                    .table(Customers::Table)
                    .col(Customers::Birthday)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Histories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Histories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Histories::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Histories::Date).date().not_null())
                    .col(
                        ColumnDef::new(Histories::NumberOfPeople)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Histories::Price).integer().not_null())
                    .col(
                        ColumnDef::new(Histories::Room)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Histories::Note).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_histories_customer")
                            .from(Histories::Table, Histories::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_histories_customer")
                    .table(Histories::Table)
                    .col(Histories::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_histories_date")
                    .table(Histories::Table)
                    .col(Histories::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(100)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序: histories -> customers -> citizenships, users 独立
        manager
            .drop_table(Table::drop().if_exists().table(Histories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Citizenships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
