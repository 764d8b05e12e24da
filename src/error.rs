/// Error types for folder operations
use thiserror::Error;

/// Result type alias using the folder store's error type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Rejected folder or chat operations.
///
/// None of these are faults: the store is left untouched and the caller
/// reports the condition to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Folder name was empty after trimming
    #[error("Please enter a folder name")]
    EmptyName,

    /// A folder with this name already exists
    #[error("Folder \"{0}\" already exists")]
    DuplicateFolder(String),

    /// The chat url is already saved in the folder
    #[error("This chat is already in folder \"{0}\"")]
    DuplicateChat(String),

    /// Folder no longer exists
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// Chat index no longer exists in the folder
    #[error("Chat {index} not found in folder \"{folder}\"")]
    ChatNotFound { folder: String, index: usize },
}

impl StoreError {
    /// Stale references (deleted folder, shifted index) are no-ops for the caller
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::FolderNotFound(_) | StoreError::ChatNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::DuplicateFolder("Work".to_string()).to_string(),
            "Folder \"Work\" already exists"
        );
        assert_eq!(
            StoreError::ChatNotFound { folder: "Work".to_string(), index: 3 }.to_string(),
            "Chat 3 not found in folder \"Work\""
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(StoreError::FolderNotFound("x".to_string()).is_not_found());
        assert!(StoreError::ChatNotFound { folder: "x".to_string(), index: 0 }.is_not_found());
        assert!(!StoreError::EmptyName.is_not_found());
        assert!(!StoreError::DuplicateChat("x".to_string()).is_not_found());
    }
}
