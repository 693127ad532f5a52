use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, DbErr, QueryFilter, QueryOrder, Set, TransactionTrait};
use serde::Serialize;
use std::collections::HashSet;

use super::class_session;

/// One student's presence in one class session run.
///
/// The auto-increment id doubles as arrival order; the unique
/// (class_code, student_id) pair holds the no-duplicate invariant even under
/// concurrent marking.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_code: String,
    pub student_id: String,
    pub marked_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_session::Entity",
        from = "Column::ClassCode",
        to = "super::class_session::Column::Code"
    )]
    Session,
}

impl Related<super::class_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Result of a mark operation. Marking an already-present student is a
/// success, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    AlreadyMarked,
}

impl Model {
    /// Marks a student present, idempotently.
    ///
    /// The existence check, entry insert, and counter increment run as one
    /// transaction, so `present_count` always equals the number of entries
    /// once the call returns, two students marking concurrently both land,
    /// and one student marking twice concurrently lands once.
    pub async fn mark(
        db: &DatabaseConnection,
        class_code: &str,
        student_id: &str,
        marked_at: &str,
    ) -> Result<MarkOutcome, DbErr> {
        let txn = db.begin().await?;

        let already = Entity::find()
            .filter(Column::ClassCode.eq(class_code))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await?
            .is_some();
        if already {
            txn.rollback().await?;
            return Ok(MarkOutcome::AlreadyMarked);
        }

        ActiveModel {
            class_code: Set(class_code.to_owned()),
            student_id: Set(student_id.to_owned()),
            marked_at: Set(marked_at.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        class_session::Entity::update_many()
            .col_expr(
                class_session::Column::PresentCount,
                Expr::col(class_session::Column::PresentCount).add(1),
            )
            .filter(class_session::Column::Code.eq(class_code))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(MarkOutcome::Marked)
    }

    /// All entries for a class in arrival order.
    pub async fn for_class(db: &DatabaseConnection, class_code: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassCode.eq(class_code))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Which of the given class codes this student is marked in, fetched in
    /// one query for schedule annotation.
    pub async fn marked_codes_for_student(
        db: &DatabaseConnection,
        class_codes: &[String],
        student_id: &str,
    ) -> Result<HashSet<String>, DbErr> {
        if class_codes.is_empty() {
            return Ok(HashSet::new());
        }

        let entries = Entity::find()
            .filter(Column::ClassCode.is_in(class_codes.iter().cloned()))
            .filter(Column::StudentId.eq(student_id))
            .all(db)
            .await?;

        Ok(entries.into_iter().map(|e| e.class_code).collect())
    }
}
