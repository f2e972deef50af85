use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    BreakDate,
    BreakReason,
    BreakFee,
    Archived,
}

/// Adds the rupture fields and the archive flag used by the periodic
/// archive job.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Contracts::Table)
                    .add_column(ColumnDef::new(Contracts::BreakDate).date())
                    .add_column(ColumnDef::new(Contracts::BreakReason).text())
                    .add_column(ColumnDef::new(Contracts::BreakFee).decimal_len(10, 2))
                    .add_column(
                        ColumnDef::new(Contracts::Archived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Contracts::Table)
                    .drop_column(Contracts::BreakDate)
                    .drop_column(Contracts::BreakReason)
                    .drop_column(Contracts::BreakFee)
                    .drop_column(Contracts::Archived)
                    .to_owned(),
            )
            .await
    }
}
