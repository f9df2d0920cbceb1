//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::NotFound {
        entity_type: "Board".to_string(),
        id: "abc12345".to_string(),
    };
    assert_eq!(err.to_string(), "Entity not found: Board with id 'abc12345'");
}

#[test]
fn already_exists_error_displays_correctly() {
    let err = DbError::AlreadyExists {
        entity_type: "User".to_string(),
        id: "ada@example.com".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Entity already exists: User with id 'ada@example.com'"
    );
}

#[test]
fn sqlx_errors_become_database_errors() {
    let err = DbError::from(sqlx::Error::RowNotFound);
    assert!(matches!(err, DbError::Database { .. }));
}

#[test]
fn db_result_propagates_with_question_mark() {
    fn inner() -> DbResult<()> {
        Err(DbError::Validation {
            message: "title is required".to_string(),
        })
    }

    fn outer() -> DbResult<u8> {
        inner()?;
        Ok(1)
    }

    assert!(matches!(outer(), Err(DbError::Validation { .. })));
}
