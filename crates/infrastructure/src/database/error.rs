//! Translation of storage failures into `DomainError`
//!
//! Constraint violations are recognised through sea-orm's `SqlErr`
//! classification, falling back to the driver's `ErrorKind` and SQLite result
//! codes. Everything else
//! is split into transient (`StorageUnavailable`) and permanent (`Storage`).

use domain::DomainError;
use sea_orm::{DbErr, DeleteResult, RuntimeErr, SqlErr};
use sqlx::error::ErrorKind;

/// SQLSTATE / SQLite result codes worth retrying: serialization failure,
/// deadlock, admin shutdown, and SQLite busy/locked variants
const TRANSIENT_CODES: &[&str] = &["40001", "40P01", "57P01", "5", "6", "261", "517"];

/// SQLite foreign key failures: 787 on insert, 1811 when an
/// `ON DELETE RESTRICT` action fires. sqlx only classifies the first.
const FOREIGN_KEY_CODES: &[&str] = &["787", "1811"];

#[derive(Debug)]
pub(crate) enum StorageFailure {
    UniqueViolation(String),
    ForeignKeyViolation(String),
    Other(DomainError),
}

pub(crate) fn classify(err: DbErr) -> StorageFailure {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return StorageFailure::UniqueViolation(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            return StorageFailure::ForeignKeyViolation(msg);
        }
        _ => {}
    }

    match driver_error_kind(&err) {
        Some((ErrorKind::UniqueViolation, msg)) => StorageFailure::UniqueViolation(msg),
        Some((ErrorKind::ForeignKeyViolation, msg)) => StorageFailure::ForeignKeyViolation(msg),
        _ if driver_error_code(&err).is_some_and(|code| is_foreign_key_code(&code)) => {
            StorageFailure::ForeignKeyViolation(err.to_string())
        }
        _ => StorageFailure::Other(unavailable_or_storage(err)),
    }
}

fn is_foreign_key_code(code: &str) -> bool {
    FOREIGN_KEY_CODES.contains(&code)
}

/// Generic translation for paths where no constraint violation is expected
pub(crate) fn storage_error(err: DbErr) -> DomainError {
    match classify(err) {
        StorageFailure::UniqueViolation(msg) => DomainError::ConflictingUniqueValue(msg),
        StorageFailure::ForeignKeyViolation(msg) => DomainError::ReferenceNotFound(msg),
        StorageFailure::Other(e) => e,
    }
}

/// Maps the outcome of a single-row restrict delete
pub(crate) fn finish_delete(
    result: Result<DeleteResult, DbErr>,
    what: impl std::fmt::Display,
) -> Result<(), DomainError> {
    match result {
        Ok(res) if res.rows_affected == 0 => {
            Err(DomainError::NotFound(format!("{what} does not exist")))
        }
        Ok(_) => Ok(()),
        Err(err) => Err(match classify(err) {
            StorageFailure::ForeignKeyViolation(_) => {
                DomainError::ReferenceInUse(format!("{what} is still referenced"))
            }
            StorageFailure::UniqueViolation(msg) => DomainError::Storage(msg),
            StorageFailure::Other(e) => e,
        }),
    }
}

pub(crate) fn missing(what: impl std::fmt::Display) -> DomainError {
    DomainError::ReferenceNotFound(format!("{what} does not exist"))
}

fn driver_error_kind(err: &DbErr) -> Option<(ErrorKind, String)> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .map(|db| (db.kind(), db.message().to_string())),
        _ => None,
    }
}

fn driver_error_code(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}

fn is_transient(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        _ => driver_error_code(err)
            .map(|code| TRANSIENT_CODES.contains(&code.as_str()))
            .unwrap_or(false),
    }
}

fn unavailable_or_storage(err: DbErr) -> DomainError {
    if is_transient(&err) {
        DomainError::StorageUnavailable(err.to_string())
    } else {
        DomainError::Storage(err.to_string())
    }
}
