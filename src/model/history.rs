use crate::model::HistoryEntry;
use serde::{Deserialize, Serialize};

/// Page size used for every history listing.
pub const HISTORY_PAGE_SIZE: u32 = 20;

/// Query for one page of the history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub page: u32,
    pub page_size: u32,
}

impl HistoryQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            page_size: HISTORY_PAGE_SIZE,
        }
    }
}

/// One page of past generations, in the order the server returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total_count: 0,
            page_number: 1,
            page_size: HISTORY_PAGE_SIZE,
        }
    }
}

impl HistoryPage {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page_number) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn favorites(&self) -> Vec<HistoryEntry> {
        self.entries.iter().filter(|e| e.is_favorite).cloned().collect()
    }
}
