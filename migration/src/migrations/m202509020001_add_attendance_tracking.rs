use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202509020001_add_attendance_tracking"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Backfill for sessions created before attendance tracking existed.
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("class_sessions"))
                    .add_column(
                        ColumnDef::new(Alias::new("present_count"))
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // attendance_entries: insertion order (id) is arrival order; the
        // unique (class_code, student_id) pair makes marking idempotent even
        // under concurrent requests.
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("attendance_entries"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("class_code")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_id")).string().not_null())
                    // "HH:MM" local wall-clock stamp shown on the roster
                    .col(ColumnDef::new(Alias::new("marked_at")).string_len(5).not_null())
                    .index(
                        Index::create()
                            .col(Alias::new("class_code"))
                            .col(Alias::new("student_id"))
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_att_entry_session")
                            .from(Alias::new("attendance_entries"), Alias::new("class_code"))
                            .to(Alias::new("class_sessions"), Alias::new("code"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("attendance_entries"))
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("class_sessions"))
                    .drop_column(Alias::new("present_count"))
                    .to_owned(),
            )
            .await
    }
}
