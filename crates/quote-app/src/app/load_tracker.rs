//! Price table load state with stale-response protection
//!
//! Every load gets a ticket. Only the result for the most recent ticket is
//! applied; a response that arrives after a newer load started is dropped.

use tracing::{info, warn};

use quote_domain::model::PriceTable;
use quote_types::Result;

/// Message shown when the sheet cannot be loaded
pub const LOAD_FAILURE_MESSAGE: &str = "無法載入價格資料，請檢查網路連線";

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Where the price table currently stands
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Ready(PriceTable),
    Failed {
        message: String,
        detail: String,
    },
}

#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
    state: LoadState,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load. Any table from an earlier load is discarded.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.latest)
    }

    /// Apply a finished load. Returns false when the ticket is stale.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<PriceTable>) -> bool {
        if ticket.0 != self.latest {
            info!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale price sheet response"
            );
            return false;
        }

        self.state = match result {
            Ok(table) => {
                info!(models = table.models().len(), "price table ready");
                LoadState::Ready(table)
            }
            Err(e) => {
                warn!("Failed to fetch data: {}", e);
                LoadState::Failed {
                    message: LOAD_FAILURE_MESSAGE.to_string(),
                    detail: e.to_string(),
                }
            }
        };
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Loaded table, only when the latest load succeeded
    pub fn table(&self) -> Option<&PriceTable> {
        match &self.state {
            LoadState::Ready(table) => Some(table),
            _ => None,
        }
    }
}
