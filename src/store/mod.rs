//! State container behind the history view.
//!
//! Loads follow a "latest request wins" policy: every load is issued a
//! [`LoadTicket`] and only the result carrying the newest ticket is applied.
//! Results of superseded loads are dropped.

mod pagination;

pub use pagination::{PageSize, Pagination};

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{HistoryError, Result};
use crate::export::write_statement;
use crate::ledger::Totals;
use crate::model::{DebtorInfo, PaymentRecord};
use crate::source::{HistoryPage, HistoryQuery, HistorySource};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Identifies one issued load. Only the newest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct DebtorStore<S> {
    source: S,
    state: LoadState,
    selected_debtor_id: Option<String>,
    debtor: Option<DebtorInfo>,
    records: Vec<PaymentRecord>,
    totals: Totals,
    total_items: usize,
    pagination: Pagination,
    latest_ticket: u64,
}

impl<S: HistorySource> DebtorStore<S> {
    pub fn new(source: S, page_size: PageSize) -> Self {
        Self {
            source,
            state: LoadState::Idle,
            selected_debtor_id: None,
            debtor: None,
            records: Vec::new(),
            totals: Totals::new(),
            total_items: 0,
            pagination: Pagination::new(page_size),
            latest_ticket: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn selected_debtor_id(&self) -> Option<&str> {
        self.selected_debtor_id.as_deref()
    }

    pub fn debtor(&self) -> Option<&DebtorInfo> {
        self.debtor.as_ref()
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.total_items)
    }

    /// Select a debtor and enter the loading state.
    pub fn begin_load(&mut self, debtor_id: &str) -> LoadTicket {
        self.latest_ticket += 1;
        self.selected_debtor_id = Some(debtor_id.to_string());
        self.state = LoadState::Loading;
        debug!(debtor = %debtor_id, ticket = self.latest_ticket, "load started");
        LoadTicket(self.latest_ticket)
    }

    /// Query for the selected debtor at the current page position
    pub fn query(&self) -> Option<HistoryQuery> {
        self.selected_debtor_id.as_ref().map(|id| HistoryQuery {
            debtor_id: id.clone(),
            limit: self.pagination.limit(),
            offset: self.pagination.offset,
        })
    }

    /// Apply the outcome of a load. Returns false if the ticket was
    /// superseded and the result was discarded.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<HistoryPage>) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding superseded load"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.totals = page.totals;
                self.total_items = page.total_items;
                self.records = page.records;
                info!(
                    debtor = %page.debtor.id,
                    records = self.records.len(),
                    total_items = self.total_items,
                    "debtor history loaded"
                );
                self.debtor = Some(page.debtor);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "error fetching debtor history");
                self.debtor = None;
                self.records.clear();
                self.totals = Totals::new();
                self.total_items = 0;
                self.state = LoadState::Failed(HistoryError::LoadFailed(e.to_string()).to_string());
            }
        }
        true
    }

    /// Select a debtor and load the page at the current position
    pub fn load(&mut self, debtor_id: &str) -> Result<()> {
        let ticket = self.begin_load(debtor_id);
        let Some(query) = self.query() else {
            return Ok(());
        };

        match self.source.fetch_history(&query) {
            Ok(page) => {
                self.complete_load(ticket, Ok(page));
                Ok(())
            }
            Err(e) => {
                let cause = e.to_string();
                self.complete_load(ticket, Err(e));
                Err(HistoryError::LoadFailed(cause))
            }
        }
    }

    /// Reload the selected debtor, if any
    pub fn refresh(&mut self) -> Result<()> {
        match self.selected_debtor_id.clone() {
            Some(id) => self.load(&id),
            None => Ok(()),
        }
    }

    /// Step to the next page size and go back to the first page
    pub fn cycle_page_size(&mut self) -> Result<()> {
        self.set_page_size(self.pagination.page_size.next())
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> Result<()> {
        self.pagination = Pagination::new(page_size);
        self.refresh()
    }

    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        self.pagination.offset = offset;
        self.refresh()
    }

    /// Jump to a 1-based page
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        let offset = match self.pagination.offset_for_page(page) {
            Some(offset) if page > 0 => offset,
            _ => return Err(HistoryError::InvalidPage(page)),
        };
        self.set_offset(offset)
    }

    /// Write the selected debtor's full history as a statement into `dir`.
    ///
    /// Requires a loaded debtor with at least one record on any page.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        let debtor = match &self.debtor {
            Some(debtor) if self.total_items > 0 => debtor,
            _ => {
                let id = self.selected_debtor_id.clone().unwrap_or_default();
                return Err(HistoryError::NothingToExport(id));
            }
        };

        let full = self.source.fetch_history(&HistoryQuery {
            debtor_id: debtor.id.clone(),
            limit: usize::MAX,
            offset: 0,
        })?;
        write_statement(dir, &full.debtor, &full.records, &full.totals)
    }
}
