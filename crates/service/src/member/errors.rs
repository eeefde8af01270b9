use thiserror::Error;

use crate::pagination::PaginationError;

/// Business errors for membership workflows
#[derive(Debug, Error)]
pub enum MemberError {
    #[error("{0}")]
    Validation(String),
    #[error("Member not found")]
    NotFound,
    #[error("repository error: {0}")]
    Repository(String),
}

impl MemberError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            MemberError::Validation(_) => 2001,
            MemberError::NotFound => 2002,
            MemberError::Repository(_) => 2100,
        }
    }
}

impl From<models::errors::ModelError> for MemberError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => MemberError::Validation(msg),
            models::errors::ModelError::Db(msg) => MemberError::Repository(msg),
        }
    }
}

impl From<PaginationError> for MemberError {
    fn from(e: PaginationError) -> Self {
        MemberError::Validation(e.to_string())
    }
}

impl From<sea_orm::DbErr> for MemberError {
    fn from(e: sea_orm::DbErr) -> Self {
        MemberError::Repository(e.to_string())
    }
}
