use crate::framework::Response;
use crate::history::HistoryError;
use crate::model::{GenerationId, HistoryEntry, HistoryPage};

/// Consistent copy of the history store's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub page: HistoryPage,
    pub loading: bool,
    pub error: Option<HistoryError>,
}

impl HistorySnapshot {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.page.entries
    }

    pub fn total_pages(&self) -> u64 {
        self.page.total_pages()
    }
}

pub type FetchReply = Response<Result<HistoryPage, HistoryError>>;
pub type EntryReply = Response<Result<HistoryEntry, HistoryError>>;

#[derive(Debug)]
pub enum HistoryMessage {
    Fetch {
        page: u32,
        respond_to: FetchReply,
    },
    ToggleFavorite {
        id: GenerationId,
        desired: bool,
        respond_to: EntryReply,
    },
    /// Replaces the matching entry with a server-confirmed copy.
    ApplyFavorite {
        confirmed: HistoryEntry,
        respond_to: Response<bool>,
    },
    Snapshot {
        respond_to: Response<HistorySnapshot>,
    },
    ClearError,
    FetchSettled {
        token: u64,
        page: u32,
        outcome: Result<HistoryPage, HistoryError>,
        respond_to: FetchReply,
    },
    FavoriteSettled {
        outcome: Result<HistoryEntry, HistoryError>,
        respond_to: EntryReply,
    },
}
