use crate::modules::common::responses::{internal_error_res, SimpleError};
use convert_case::{Case, Casing};
use http::StatusCode;
use sea_orm::{DbErr, SqlErr};

/// Wrapper for seaorm errors.
///
/// This is useful for wrapping database errors and safely returning them from
/// axum route handlers without worrying about leaking sensitive information,
/// as it implements `Into<(StatusCode, SimpleError)>`
pub struct DbError(pub DbErr);

impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        DbError(err)
    }
}

impl From<DbError> for (StatusCode, SimpleError) {
    fn from(err: DbError) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.0.sql_err() {
            if let Some(column_name) = get_column_name_from_db_error_msg(&msg) {
                let error_msg = format!("{}_IN_USE", column_name.to_case(Case::ScreamingSnake));

                return (StatusCode::BAD_REQUEST, SimpleError::from(error_msg));
            }

            return internal_error_res();
        }

        match err.0 {
            DbErr::RecordNotFound(_) => {
                (StatusCode::NOT_FOUND, SimpleError::from("entity not found"))
            }

            _ => internal_error_res(),
        }
    }
}

/// Extracts the column name from the name of a database unique constraint,
/// assuming the naming pattern: `<table_name>_<column>_unique`.
///
/// returns `Some(<column>)` if the pattern is ok otherwise `None`.
fn get_column_name_from_unique_constraint_name(unique_constraint_name: &str) -> Option<&str> {
    if let Some(non_suffixed_constraint_name) = unique_constraint_name.strip_suffix("_unique") {
        return non_suffixed_constraint_name.split('_').last();
    }

    None
}

/// Returns the column name from a postgres unique violation error message,
/// which quotes the violated constraint name, eg:
///
/// `duplicate key value violates unique constraint "user_email_unique"`
fn get_column_name_from_db_error_msg(msg: &str) -> Option<&str> {
    let constraint_name = msg.split('"').nth(1)?;

    get_column_name_from_unique_constraint_name(constraint_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_column_from_well_formed_constraint_names() {
        assert_eq!(
            get_column_name_from_unique_constraint_name("user_email_unique"),
            Some("email")
        );
        assert_eq!(
            get_column_name_from_unique_constraint_name("driver_phone_unique"),
            Some("phone")
        );
        assert_eq!(
            get_column_name_from_unique_constraint_name("user_email_pkey"),
            None
        );
    }

    #[test]
    fn extracts_column_from_postgres_error_message() {
        let msg = r#"duplicate key value violates unique constraint "user_email_unique""#;
        assert_eq!(get_column_name_from_db_error_msg(msg), Some("email"));

        assert_eq!(get_column_name_from_db_error_msg("no quotes here"), None);
    }
}
