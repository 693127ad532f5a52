use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202508110002_create_timetable_slots"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("timetable_slots"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("timetable_id"))
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("day")).text().not_null())
                    // in-day ordering of slots, 0-based
                    .col(ColumnDef::new(Alias::new("position")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("code")).string().not_null())
                    .col(ColumnDef::new(Alias::new("subject")).string().not_null())
                    .col(ColumnDef::new(Alias::new("venue")).string().null())
                    // "HH:MM" 24-hour local time, lexicographically comparable
                    .col(ColumnDef::new(Alias::new("start_time")).string_len(5).not_null())
                    .col(ColumnDef::new(Alias::new("end_time")).string_len(5).not_null())
                    .index(
                        Index::create()
                            .col(Alias::new("timetable_id"))
                            .col(Alias::new("day"))
                            .col(Alias::new("position"))
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("timetable_slots")).to_owned())
            .await
    }
}
