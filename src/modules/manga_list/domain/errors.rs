use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::errors::AppError;

/// Business-rule failures raised by the manga list use case.
///
/// Storage failures are carried through `Storage` untouched.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum MangaListError {
    #[error("Manga list {0} not found")]
    ListNotFound(Uuid),

    /// The referenced manga does not exist in the catalog
    #[error("Manga {0} not found")]
    MangaNotFound(Uuid),

    /// The membership row does not exist in this list
    #[error("Item {0} not found in manga list")]
    ListItemNotFound(Uuid),

    #[error("Manga {0} is already in the list")]
    MangaAlreadyInList(Uuid),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Storage(#[from] AppError),
}

impl MangaListError {
    /// Stable machine-readable code for the calling layer
    pub fn kind(&self) -> &'static str {
        match self {
            MangaListError::ListNotFound(_) => "LIST_NOT_FOUND",
            MangaListError::MangaNotFound(_) => "MANGA_NOT_FOUND",
            MangaListError::ListItemNotFound(_) => "LIST_ITEM_NOT_FOUND",
            MangaListError::MangaAlreadyInList(_) => "MANGA_ALREADY_IN_LIST",
            MangaListError::InvalidData(_) => "INVALID_DATA",
            MangaListError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MangaListError::ListNotFound(_)
                | MangaListError::MangaNotFound(_)
                | MangaListError::ListItemNotFound(_)
        )
    }
}

pub type MangaListResult<T> = Result<T, MangaListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_keep_their_message() {
        let err: MangaListError = AppError::DatabaseError("connection reset".into()).into();
        assert_eq!(err.to_string(), "Database error: connection reset");
        assert_eq!(err.kind(), "STORAGE_ERROR");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_variants_are_flagged() {
        let id = Uuid::new_v4();
        assert!(MangaListError::ListNotFound(id).is_not_found());
        assert!(MangaListError::MangaNotFound(id).is_not_found());
        assert!(MangaListError::ListItemNotFound(id).is_not_found());
        assert!(!MangaListError::MangaAlreadyInList(id).is_not_found());
        assert!(!MangaListError::InvalidData("x".into()).is_not_found());
    }
}
