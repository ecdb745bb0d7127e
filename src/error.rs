//! Error classification shared by every component.
//!
//! Each component keeps its own `thiserror` enum (`GenerationError`,
//! `HistoryError`, `FavoriteError`). They all report an [`ErrorKind`], so a
//! caller can decide how to present a failure without matching on every
//! component's variants.

use std::fmt;

/// Coarse category of a component failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generation requested without a model or garment.
    InvalidSelection,
    /// The generation backend failed or returned an unusable result.
    GatewayFailure,
    /// The generation backend did not answer in time.
    Timeout,
    /// A history page could not be loaded.
    HistoryFetchFailure,
    /// A favorite flag could not be written.
    FavoriteUpdateFailure,
    /// The response was discarded because a newer request replaced it,
    /// or an identical request is still pending.
    Superseded,
    /// The component's mailbox is closed or it dropped the reply.
    Communication,
}

impl ErrorKind {
    /// True for failures that came from the generation backend.
    pub fn is_remote_failure(self) -> bool {
        matches!(self, ErrorKind::GatewayFailure | ErrorKind::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::InvalidSelection => "invalid selection",
            ErrorKind::GatewayFailure => "gateway failure",
            ErrorKind::Timeout => "timeout",
            ErrorKind::HistoryFetchFailure => "history fetch failure",
            ErrorKind::FavoriteUpdateFailure => "favorite update failure",
            ErrorKind::Superseded => "superseded",
            ErrorKind::Communication => "communication",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_failures() {
        assert!(ErrorKind::GatewayFailure.is_remote_failure());
        assert!(ErrorKind::Timeout.is_remote_failure());
        assert!(!ErrorKind::InvalidSelection.is_remote_failure());
        assert!(!ErrorKind::HistoryFetchFailure.is_remote_failure());
    }
}
