//! Directory store error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("show {show_id} references missing {entity} {id}")]
    BrokenReference {
        show_id: i32,
        entity: &'static str,
        id: i32,
    },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
