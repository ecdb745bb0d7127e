use crate::framework::{Actor, Myself};
use crate::gateway::TryOnGateway;
use crate::history::messages::{EntryReply, FetchReply};
use crate::history::{HistoryError, HistoryMessage, HistorySnapshot};
use crate::model::{GenerationId, HistoryEntry, HistoryPage, HistoryQuery};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Holds one page of past generations.
pub struct HistoryStore {
    page: HistoryPage,
    loading: bool,
    error: Option<HistoryError>,
    latest_token: u64,
    /// Favorites confirmed while a fetch was outstanding. The page that
    /// fetch returns may predate them.
    confirmed_while_loading: HashMap<GenerationId, bool>,
    request_timeout: Duration,
}

impl HistoryStore {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            page: HistoryPage::default(),
            loading: false,
            error: None,
            latest_token: 0,
            confirmed_while_loading: HashMap::new(),
            request_timeout,
        }
    }

    fn fetch(
        &mut self,
        page: u32,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<HistoryMessage>,
        respond_to: FetchReply,
    ) {
        self.latest_token += 1;
        let token = self.latest_token;
        self.loading = true;
        self.error = None;
        debug!(token, page, "Fetching history");

        let gateway = gateway.clone();
        let limit = self.request_timeout;
        myself.pipe(async move {
            let query = HistoryQuery::page(page);
            let outcome = match tokio::time::timeout(limit, gateway.list_history(query)).await {
                Ok(Ok(page)) => Ok(page),
                Ok(Err(e)) => Err(HistoryError::FetchFailed(e.to_string())),
                Err(_) => Err(HistoryError::FetchFailed(format!(
                    "timed out after {}s",
                    limit.as_secs()
                ))),
            };
            HistoryMessage::FetchSettled {
                token,
                page,
                outcome,
                respond_to,
            }
        });
    }

    fn settle_fetch(
        &mut self,
        token: u64,
        page: u32,
        outcome: Result<HistoryPage, HistoryError>,
        respond_to: FetchReply,
    ) {
        if token != self.latest_token {
            debug!(token, page, latest = self.latest_token, "Discarding stale history page");
            let _ = respond_to.send(Err(HistoryError::Superseded { page }));
            return;
        }

        self.loading = false;
        let confirmed = std::mem::take(&mut self.confirmed_while_loading);
        let outcome = outcome.map(|mut loaded| {
            for entry in &mut loaded.entries {
                if let Some(&is_favorite) = confirmed.get(&entry.id) {
                    entry.is_favorite = is_favorite;
                }
            }
            loaded
        });
        match &outcome {
            Ok(loaded) => {
                info!(page = loaded.page_number, entries = loaded.entries.len(), total = loaded.total_count, "History loaded");
                self.page = loaded.clone();
            }
            Err(e) => {
                warn!(page, error = %e, "History fetch failed");
                self.error = Some(e.clone());
            }
        }
        let _ = respond_to.send(outcome);
    }

    fn toggle_favorite(
        &self,
        id: GenerationId,
        desired: bool,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<HistoryMessage>,
        respond_to: EntryReply,
    ) {
        let gateway = gateway.clone();
        let limit = self.request_timeout;
        myself.pipe(async move {
            let outcome = match tokio::time::timeout(limit, gateway.set_favorite(&id, desired)).await {
                Ok(Ok(entry)) => Ok(entry),
                Ok(Err(e)) => Err(HistoryError::FavoriteUpdateFailed(e.to_string())),
                Err(_) => Err(HistoryError::FavoriteUpdateFailed(format!(
                    "timed out after {}s",
                    limit.as_secs()
                ))),
            };
            HistoryMessage::FavoriteSettled {
                outcome,
                respond_to,
            }
        });
    }

    /// Returns true if an entry with the same id was on the page.
    fn replace_entry(&mut self, confirmed: &HistoryEntry) -> bool {
        if self.loading {
            self.confirmed_while_loading
                .insert(confirmed.id.clone(), confirmed.is_favorite);
        }
        match self.page.entries.iter_mut().find(|e| e.id == confirmed.id) {
            Some(entry) => {
                *entry = confirmed.clone();
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            page: self.page.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

#[async_trait]
impl Actor for HistoryStore {
    type Message = HistoryMessage;
    type Context = Arc<dyn TryOnGateway>;

    fn name() -> &'static str {
        "history"
    }

    async fn handle(
        &mut self,
        msg: HistoryMessage,
        gateway: &Arc<dyn TryOnGateway>,
        myself: &Myself<HistoryMessage>,
    ) {
        match msg {
            HistoryMessage::Fetch { page, respond_to } => {
                self.fetch(page, gateway, myself, respond_to)
            }
            HistoryMessage::ToggleFavorite {
                id,
                desired,
                respond_to,
            } => self.toggle_favorite(id, desired, gateway, myself, respond_to),
            HistoryMessage::ApplyFavorite {
                confirmed,
                respond_to,
            } => {
                let _ = respond_to.send(self.replace_entry(&confirmed));
            }
            HistoryMessage::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            HistoryMessage::ClearError => self.error = None,
            HistoryMessage::FetchSettled {
                token,
                page,
                outcome,
                respond_to,
            } => self.settle_fetch(token, page, outcome, respond_to),
            HistoryMessage::FavoriteSettled {
                outcome,
                respond_to,
            } => {
                if let Ok(confirmed) = &outcome {
                    let replaced = self.replace_entry(confirmed);
                    info!(id = %confirmed.id, is_favorite = confirmed.is_favorite, replaced, "Favorite confirmed");
                }
                let _ = respond_to.send(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenerationResult;

    #[test]
    fn test_replace_entry_only_touches_matching_id() {
        let mut store = HistoryStore::new(Duration::from_secs(15));
        store.page.entries = vec![
            GenerationResult::completed("t1", "a.png"),
            GenerationResult::completed("t2", "b.png"),
        ];

        let mut confirmed = GenerationResult::completed("t2", "b.png");
        confirmed.is_favorite = true;
        assert!(store.replace_entry(&confirmed));
        assert!(!store.page.entries[0].is_favorite);
        assert!(store.page.entries[1].is_favorite);

        let unknown = GenerationResult::completed("t9", "z.png");
        assert!(!store.replace_entry(&unknown));
        assert_eq!(store.page.entries.len(), 2);
    }
}
