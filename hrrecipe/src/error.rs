//! Types d'erreurs pour hrrecipe

use crate::item::BlockKind;

/// Erreurs de manipulation d'une recette
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Recipe item not found: {0}")]
    NotFound(String),

    #[error("Duplicate recipe item identifier: {0}")]
    DuplicateId(String),

    #[error("Field {field} does not belong to a {kind} block")]
    FieldMismatch { field: &'static str, kind: BlockKind },
}

/// Type Result spécialisé pour hrrecipe
pub type Result<T> = std::result::Result<T, Error>;
