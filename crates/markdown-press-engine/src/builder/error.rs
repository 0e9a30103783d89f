use thiserror::Error;

/// A lifecycle or list precondition that an [`HtmlBuilder`](super::HtmlBuilder)
/// operation found violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("document not started")]
    NotStarted,
    #[error("document already ended")]
    AlreadyEnded,
    #[error("list already open")]
    ListAlreadyOpen,
    #[error("no open list to add item")]
    NoListForItem,
    #[error("no open list to end")]
    NoListToEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    InvalidState(#[from] StateError),
    #[error("heading level must be between 1 and 6, got {level}")]
    HeadingLevelOutOfRange { level: u8 },
}

impl BuildError {
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, BuildError::InvalidState(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, BuildError::HeadingLevelOutOfRange { .. })
    }
}
