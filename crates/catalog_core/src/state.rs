use crate::view_model::{EmptyState, ListViewModel};
use crate::{CatalogItem, QuerySnapshot, ResultPage};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    page: u32,
    append: bool,
}

/// Visible state of the list view.
///
/// Only the resolution recorded as in flight may commit; anything else that
/// arrives is stale and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    snapshot: QuerySnapshot,
    items: Vec<CatalogItem>,
    loading: bool,
    error: Option<String>,
    has_more: bool,
    current_page: u32,
    next_request_id: RequestId,
    in_flight: Option<InFlight>,
    dirty: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            snapshot: QuerySnapshot::default(),
            items: Vec::new(),
            loading: false,
            error: None,
            has_more: true,
            current_page: 1,
            next_request_id: 1,
            in_flight: None,
            dirty: false,
        }
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ListViewModel {
        let empty_state = if self.items.is_empty() && !self.loading && self.error.is_none() {
            Some(if self.snapshot.is_filtered() {
                EmptyState::NoMatches
            } else {
                EmptyState::NothingAvailable
            })
        } else {
            None
        };
        ListViewModel {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
            has_more: self.has_more,
            current_page: self.current_page,
            show_placeholders: self.loading && self.items.is_empty(),
            show_load_more: self.has_more && self.error.is_none() && !self.items.is_empty(),
            empty_state,
            dirty: self.dirty,
        }
    }

    pub fn snapshot(&self) -> &QuerySnapshot {
        &self.snapshot
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn active_request(&self) -> Option<RequestId> {
        self.in_flight.map(|f| f.request_id)
    }

    /// Returns whether state changed since the last call, then clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Adopt a new query; its explicit page (default 1) becomes current.
    pub(crate) fn set_snapshot(&mut self, snapshot: QuerySnapshot) {
        self.current_page = snapshot.page();
        self.snapshot = snapshot;
        self.dirty = true;
    }

    /// Record a new resolution as the only one allowed to commit. Returns the
    /// id of the resolution it supersedes, if any.
    pub(crate) fn begin(&mut self, page: u32, append: bool) -> (RequestId, Option<RequestId>) {
        let superseded = self.active_request();
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(InFlight {
            request_id,
            page,
            append,
        });
        self.loading = true;
        self.error = None;
        self.dirty = true;
        (request_id, superseded)
    }

    fn take_if_active(&mut self, request_id: RequestId) -> Option<InFlight> {
        match self.in_flight {
            Some(flight) if flight.request_id == request_id => self.in_flight.take(),
            _ => None,
        }
    }

    pub(crate) fn apply_page(&mut self, request_id: RequestId, page: ResultPage) -> bool {
        let Some(flight) = self.take_if_active(request_id) else {
            return false;
        };
        if flight.append {
            self.items.extend(page.items);
        } else {
            self.items = page.items;
        }
        self.has_more = page.has_more;
        self.current_page = flight.page;
        self.loading = false;
        self.dirty = true;
        true
    }

    pub(crate) fn apply_failure(&mut self, request_id: RequestId, message: String) -> bool {
        if self.take_if_active(request_id).is_none() {
            return false;
        }
        self.error = Some(message);
        self.loading = false;
        self.dirty = true;
        true
    }

    pub(crate) fn apply_cancelled(&mut self, request_id: RequestId) -> bool {
        if self.take_if_active(request_id).is_none() {
            return false;
        }
        self.loading = false;
        self.dirty = true;
        true
    }
}
