// src/db/pg_errors.rs

use crate::common::error::AppError;

/// Violação de restrição reportada pelo Postgres, com o nome da restrição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation<'a> {
    Unique(&'a str),
    ForeignKey(&'a str),
    Check(&'a str),
}

pub(crate) fn violation(e: &sqlx::Error) -> Option<Violation<'_>> {
    let sqlx::Error::Database(db_err) = e else {
        return None;
    };
    let constraint = db_err.constraint().unwrap_or_default();

    if db_err.is_unique_violation() {
        Some(Violation::Unique(constraint))
    } else if db_err.is_foreign_key_violation() {
        Some(Violation::ForeignKey(constraint))
    } else if db_err.is_check_violation() {
        Some(Violation::Check(constraint))
    } else {
        None
    }
}

/// Embrulha a falha do banco com o contexto da operação.
pub(crate) fn store_failure(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |source| AppError::StoreFailure { context, source }
}

/// Erros do Postgres montados à mão, para testar o mapeamento das restrições
/// sem um banco.
#[cfg(test)]
pub(crate) mod testing {
    use std::{borrow::Cow, error::Error as StdError, fmt};

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug, Clone, Copy)]
    pub(crate) enum Kind {
        Unique,
        ForeignKey,
        Check,
        Other,
    }

    #[derive(Debug)]
    struct ConstraintError {
        kind: Kind,
        constraint: &'static str,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violates constraint \"{}\"", self.constraint)
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            let code = match self.kind {
                Kind::Unique => "23505",
                Kind::ForeignKey => "23503",
                Kind::Check => "23514",
                Kind::Other => "XX000",
            };
            Some(Cow::Borrowed(code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                Kind::Unique => ErrorKind::UniqueViolation,
                Kind::ForeignKey => ErrorKind::ForeignKeyViolation,
                Kind::Check => ErrorKind::CheckViolation,
                Kind::Other => ErrorKind::Other,
            }
        }
    }

    pub(crate) fn db_error(kind: Kind, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { kind, constraint }))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{db_error, Kind};
    use super::*;

    #[test]
    fn classifies_constraint_violations_by_kind() {
        let e = db_error(Kind::Unique, "sections_restaurant_name_key");
        assert_eq!(
            violation(&e),
            Some(Violation::Unique("sections_restaurant_name_key"))
        );

        let e = db_error(Kind::ForeignKey, "tables_section_id_fkey");
        assert_eq!(
            violation(&e),
            Some(Violation::ForeignKey("tables_section_id_fkey"))
        );

        let e = db_error(Kind::Check, "restaurant_events_price_check");
        assert_eq!(
            violation(&e),
            Some(Violation::Check("restaurant_events_price_check"))
        );
    }

    #[test]
    fn other_errors_become_store_failures() {
        assert_eq!(violation(&db_error(Kind::Other, "x")), None);
        assert_eq!(violation(&sqlx::Error::RowNotFound), None);

        let err = store_failure("listar mesas")(sqlx::Error::PoolTimedOut);
        assert!(matches!(
            err,
            AppError::StoreFailure {
                context: "listar mesas",
                ..
            }
        ));
    }
}
