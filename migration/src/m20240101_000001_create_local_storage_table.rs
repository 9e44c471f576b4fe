use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LocalStorage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LocalStorage::StorageKey)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LocalStorage::Value).text().not_null())
                    .col(
                        ColumnDef::new(LocalStorage::SchemaVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(LocalStorage::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LocalStorage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LocalStorage {
    Table,
    StorageKey,
    Value,
    SchemaVersion,
    UpdatedAt,
}
