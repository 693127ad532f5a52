use chrono::{DateTime, Utc};
use common::geo::Coordinate;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;

/// Live session state for one class code.
///
/// One row per code, provisioned in zero state and reset in place each time a
/// teacher opens the session; never deleted. The anchor columns are set
/// together on first open and stay set from then on, so "anchor present"
/// means "opened at least once".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "class_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub active: bool,
    pub anchor_lat: Option<f64>,
    pub anchor_lng: Option<f64>,
    pub present_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_entry::Entity")]
    Entries,
}

impl Related<super::attendance_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The teacher-reported reference location, if the session has ever been
    /// opened.
    pub fn anchor(&self) -> Option<Coordinate> {
        match (self.anchor_lat, self.anchor_lng) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }

    /// Inserts a zero-state row for a class code if none exists yet. Used by
    /// provisioning; running it twice is a no-op.
    pub async fn provision<C: ConnectionTrait>(db: &C, code: &str) -> Result<(), DbErr> {
        let now = Utc::now();
        Entity::insert(ActiveModel {
            code: Set(code.to_owned()),
            active: Set(false),
            anchor_lat: Set(None),
            anchor_lng: Set(None),
            present_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(OnConflict::column(Column::Code).do_nothing().to_owned())
        .do_nothing()
        .exec(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_code(
        db: &DatabaseConnection,
        code: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(code).one(db).await
    }

    /// Opens (or re-opens) the session for a class code.
    ///
    /// Runs as a single transaction: every other session's `active` flag is
    /// cleared (one live class at a time), the target row is reset to a fresh
    /// open state anchored at the given coordinate, and any entries from a
    /// previous run of the class are purged. Re-opening is never additive.
    ///
    /// Not protected against a `mark` racing the same code: the reset may
    /// clobber a concurrent mark or vice versa.
    pub async fn open(
        db: &DatabaseConnection,
        code: &str,
        anchor: Coordinate,
    ) -> Result<Model, DbErr> {
        let txn = db.begin().await?;
        let now = Utc::now();

        Entity::update_many()
            .col_expr(Column::Active, Expr::value(false))
            .filter(Column::Code.ne(code))
            .filter(Column::Active.eq(true))
            .exec(&txn)
            .await?;

        let session = match Entity::find_by_id(code).one(&txn).await? {
            Some(existing) => {
                let mut session: ActiveModel = existing.into();
                session.active = Set(true);
                session.anchor_lat = Set(Some(anchor.lat));
                session.anchor_lng = Set(Some(anchor.lon));
                session.present_count = Set(0);
                session.updated_at = Set(now);
                session.update(&txn).await?
            }
            None => {
                ActiveModel {
                    code: Set(code.to_owned()),
                    active: Set(true),
                    anchor_lat: Set(Some(anchor.lat)),
                    anchor_lng: Set(Some(anchor.lon)),
                    present_count: Set(0),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?
            }
        };

        super::attendance_entry::Entity::delete_many()
            .filter(super::attendance_entry::Column::ClassCode.eq(code))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(session)
    }
}
