use models::domains::{attendance, members, teams};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(teams::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(teams::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::TeamId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(teams::Column::PasswordHash).string().not_null())
                    .col(ColumnDef::new(teams::Column::Event).string().null())
                    .col(ColumnDef::new(teams::Column::TransactionId).string().null())
                    .col(ColumnDef::new(teams::Column::PaymentProof).string().null())
                    .col(
                        ColumnDef::new(teams::Column::PaymentVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(teams::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(members::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(members::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(members::Column::TeamDbId).integer().not_null())
                    .col(ColumnDef::new(members::Column::Name).string().not_null())
                    .col(ColumnDef::new(members::Column::Age).integer().null())
                    .col(ColumnDef::new(members::Column::Email).string().null())
                    .col(ColumnDef::new(members::Column::Phone).string_len(16).null())
                    .col(ColumnDef::new(members::Column::Whatsapp).string_len(16).null())
                    .col(ColumnDef::new(members::Column::College).string().null())
                    .col(ColumnDef::new(members::Column::Address).text().null())
                    .col(ColumnDef::new(members::Column::Role).string_len(16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-members-team_db_id")
                            .from(members::Entity, members::Column::TeamDbId)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-members-team_db_id")
                    .table(members::Entity)
                    .col(members::Column::TeamDbId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-members-phone")
                    .table(members::Entity)
                    .col(members::Column::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(attendance::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(attendance::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(attendance::Column::TeamDbId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(attendance::Column::TeamId).string().not_null())
                    .col(ColumnDef::new(attendance::Column::TeamName).string().not_null())
                    .col(ColumnDef::new(attendance::Column::LeaderName).string().null())
                    .col(ColumnDef::new(attendance::Column::LeaderPhone).string_len(16).null())
                    .col(
                        ColumnDef::new(attendance::Column::Status)
                            .string_len(16)
                            .not_null()
                            .default("ABSENT"),
                    )
                    .col(
                        ColumnDef::new(attendance::Column::EntryTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(attendance::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendance-team_db_id")
                            .from(attendance::Entity, attendance::Column::TeamDbId)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(attendance::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(members::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(teams::Entity).to_owned())
            .await?;

        Ok(())
    }
}
