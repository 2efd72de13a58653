use sea_orm::{sqlx, DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Single-field validation failure.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::default();
        errors.add_field(field, message);
        Self::Validation(errors)
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { Self::Db(e.to_string()) }
}

/// Integrity constraint the store rejected a write with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
}

/// SQLite extended code for a foreign key enforced by an action trigger
/// (`ON DELETE RESTRICT`), which `DbErr::sql_err` does not map.
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Classify a driver error; `None` for anything that is not a constraint.
pub fn violation(e: &DbErr) -> Option<Violation> {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Some(Violation::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => Some(Violation::ForeignKey),
        _ if is_sqlite_trigger_fk(e) => Some(Violation::ForeignKey),
        _ => None,
    }
}

fn is_sqlite_trigger_fk(e: &DbErr) -> bool {
    let db_err = match e {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(d)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(d))) => d,
        _ => return false,
    };
    db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
        && db_err.message().contains("FOREIGN KEY constraint failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        assert_eq!(ServiceError::not_found("Tariff").to_string(), "Tariff not found");
    }

    #[test]
    fn non_sql_errors_are_not_violations() {
        assert_eq!(violation(&DbErr::Custom("boom".into())), None);
        assert_eq!(violation(&DbErr::RecordNotFound("x".into())), None);
    }

    #[tokio::test]
    async fn sqlite_restrict_failures_are_foreign_key_violations() -> anyhow::Result<()> {
        use sea_orm::ConnectionTrait;

        let db = crate::test_support::get_db().await?;
        db.execute_unprepared("CREATE TABLE parent (id INTEGER PRIMARY KEY)").await?;
        db.execute_unprepared(
            "CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id) ON DELETE RESTRICT)",
        )
        .await?;
        db.execute_unprepared("INSERT INTO parent (id) VALUES (1)").await?;
        db.execute_unprepared("INSERT INTO child (parent_id) VALUES (1)").await?;

        let err = db.execute_unprepared("DELETE FROM parent WHERE id = 1").await.unwrap_err();
        assert_eq!(violation(&err), Some(Violation::ForeignKey));
        Ok(())
    }

    #[test]
    fn field_error_carries_field_name() {
        match ServiceError::field("typeId", "Unknown service type") {
            ServiceError::Validation(fe) => {
                assert_eq!(fe.field_errors["typeId"], vec!["Unknown service type".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
