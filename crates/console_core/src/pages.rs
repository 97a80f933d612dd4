//! Page controllers for the two management screens and the summary view.
//!
//! Each controller owns its page state outright (collection, search text,
//! selection, busy flag) and hands derived state to whatever renders it.
//! Mutations all follow one shape: raise the busy flag, call the gateway,
//! emit a notice, refetch the full collection on success, drop the flag on
//! every exit path.

use std::sync::Arc;

use chrono::Utc;
use shared::domain::{SvcDraft, SvcId, SvcRecord, UserId, UserRecord};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    aggregate::{summarize, DashboardSnapshot},
    export::ReportSheet,
    filter::{filter, Matchable},
    gateway::{SvcDirectory, UserDirectory},
    notice::{Notice, NoticeBus},
    selection::SelectionTracker,
    store::RecordStore,
};

/// The console's fixed set of content pages. Navigation dispatches on this
/// instead of comparing string keys, so a new page is a new variant and
/// every match site is checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Users,
    Svcs,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Users => "User Management",
            Page::Svcs => "SVC Management",
        }
    }
}

/// Interactive state shared by both record-type pages: the fetched
/// collection, the live search text, the checked rows, and the busy flag
/// that disables mutation affordances while a call is outstanding.
#[derive(Debug)]
struct ResourceState<T, I> {
    store: RecordStore<T>,
    selection: SelectionTracker<I>,
    search: String,
    busy: bool,
}

impl<T, I> Default for ResourceState<T, I> {
    fn default() -> Self {
        Self {
            store: RecordStore::new(),
            selection: SelectionTracker::default(),
            search: String::new(),
            busy: false,
        }
    }
}

impl<T: Matchable + Clone, I: PartialEq + Clone> ResourceState<T, I> {
    fn visible(&self) -> Vec<T> {
        filter(self.store.records(), &self.search)
    }
}

/// Controller for the SVC management screen.
pub struct SvcPage {
    gateway: Arc<dyn SvcDirectory>,
    state: ResourceState<SvcRecord, SvcId>,
    notices: NoticeBus,
}

impl SvcPage {
    pub fn new(gateway: Arc<dyn SvcDirectory>) -> Self {
        Self::with_notices(gateway, NoticeBus::new())
    }

    pub fn with_notices(gateway: Arc<dyn SvcDirectory>, notices: NoticeBus) -> Self {
        Self {
            gateway,
            state: ResourceState::default(),
            notices,
        }
    }

    pub fn records(&self) -> &[SvcRecord] {
        self.state.store.records()
    }

    /// The records the current search leaves visible, in fetch order.
    pub fn visible(&self) -> Vec<SvcRecord> {
        self.state.visible()
    }

    pub fn search(&self) -> &str {
        &self.state.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search = query.into();
    }

    pub fn busy(&self) -> bool {
        self.state.busy
    }

    pub fn selection(&self) -> &SelectionTracker<SvcId> {
        &self.state.selection
    }

    pub fn toggle_row(&mut self, id: SvcId) {
        self.state.selection.toggle(id);
    }

    pub fn toggle_all_visible(&mut self) {
        let visible: Vec<SvcId> = self.visible().into_iter().map(|svc| svc.id).collect();
        self.state.selection.toggle_all(&visible);
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Replaces the collection with a fresh full fetch. Failures surface as
    /// a notice; the previous collection stays in place.
    pub async fn refresh(&mut self) {
        self.state.busy = true;
        let outcome = self.gateway.list().await;
        match outcome {
            Ok(records) => {
                debug!(count = records.len(), "refreshed svc collection");
                self.state.store.replace_all(records);
            }
            Err(err) => self.notices.error(err.surface("Failed to load SVCs")),
        }
        self.state.busy = false;
    }

    /// Creates a new record, or replaces `editing` when given. Returns true
    /// when the entry form should close.
    pub async fn submit(&mut self, draft: SvcDraft, editing: Option<&SvcId>) -> bool {
        self.state.busy = true;
        let saved = match editing {
            Some(id) => match self.gateway.update(id, &draft).await {
                Ok(()) => {
                    self.notices.success("SVC updated successfully");
                    true
                }
                Err(err) => {
                    self.notices.error(err.surface("Failed to update SVC"));
                    false
                }
            },
            None => match self.gateway.create(&draft).await {
                Ok(()) => {
                    self.notices.success("SVC added successfully");
                    true
                }
                Err(err) => {
                    self.notices.error(err.surface("Failed to add SVC"));
                    false
                }
            },
        };
        if saved {
            self.refresh().await;
        }
        self.state.busy = false;
        saved
    }

    pub async fn delete(&mut self, id: &SvcId) {
        self.state.busy = true;
        let outcome = self.gateway.delete(id).await;
        match outcome {
            Ok(()) => {
                self.notices.success("SVC deleted successfully");
                self.refresh().await;
            }
            Err(err) => self.notices.error(err.surface("Failed to delete SVC")),
        }
        self.state.busy = false;
    }

    /// Deletes every selected record. An empty selection is rejected locally
    /// before any network call; the selection is cleared only on success.
    pub async fn bulk_delete(&mut self) {
        if self.state.selection.is_empty() {
            self.notices.warning("Please select SVCs to delete");
            return;
        }
        self.state.busy = true;
        let outcome = self.gateway.bulk_delete(self.state.selection.ids()).await;
        match outcome {
            Ok(deleted) => {
                self.notices
                    .success(format!("{deleted} SVCs deleted successfully"));
                self.refresh().await;
                self.state.selection.clear();
            }
            Err(err) => self.notices.error(err.surface("Failed to delete SVCs")),
        }
        self.state.busy = false;
    }

    /// Submits candidate records in order. A reply with any accepted subset
    /// still refreshes and closes the entry form; a nonzero rejected count
    /// adds a warning next to the success notice. Returns true when the
    /// form should close.
    pub async fn bulk_add(&mut self, drafts: Vec<SvcDraft>) -> bool {
        self.state.busy = true;
        let outcome = self.gateway.bulk_create(&drafts).await;
        let closed = match outcome {
            Ok(results) => {
                self.notices
                    .success(format!("{} SVCs added successfully", results.successful));
                if results.failed > 0 {
                    self.notices
                        .warning(format!("{} SVCs failed to add", results.failed));
                }
                self.refresh().await;
                true
            }
            Err(err) => {
                self.notices.error(err.surface("Failed to add SVCs"));
                false
            }
        };
        self.state.busy = false;
        closed
    }

    /// Flips one record's active flag; the notice wording follows the state
    /// the server reports back.
    pub async fn toggle_status(&mut self, id: &SvcId) {
        self.state.busy = true;
        let outcome = self.gateway.toggle_status(id).await;
        match outcome {
            Ok(is_active) => {
                let state = if is_active { "activated" } else { "deactivated" };
                self.notices.success(format!("SVC {state} successfully"));
                self.refresh().await;
            }
            Err(err) => self.notices.error(err.surface("Failed to toggle status")),
        }
        self.state.busy = false;
    }

    /// Export contract over the currently visible rows.
    pub fn export_sheet(&self) -> ReportSheet {
        let sheet = ReportSheet::for_svcs(&self.visible(), Utc::now());
        self.notices.success("Report generated successfully");
        sheet
    }
}

/// Controller for the user management screen. Users are created elsewhere
/// (self-registration); this page only lists, deletes, and exports.
pub struct UserPage {
    gateway: Arc<dyn UserDirectory>,
    state: ResourceState<UserRecord, UserId>,
    notices: NoticeBus,
}

impl UserPage {
    pub fn new(gateway: Arc<dyn UserDirectory>) -> Self {
        Self::with_notices(gateway, NoticeBus::new())
    }

    pub fn with_notices(gateway: Arc<dyn UserDirectory>, notices: NoticeBus) -> Self {
        Self {
            gateway,
            state: ResourceState::default(),
            notices,
        }
    }

    pub fn records(&self) -> &[UserRecord] {
        self.state.store.records()
    }

    pub fn visible(&self) -> Vec<UserRecord> {
        self.state.visible()
    }

    pub fn search(&self) -> &str {
        &self.state.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search = query.into();
    }

    pub fn busy(&self) -> bool {
        self.state.busy
    }

    pub fn selection(&self) -> &SelectionTracker<UserId> {
        &self.state.selection
    }

    pub fn toggle_row(&mut self, id: UserId) {
        self.state.selection.toggle(id);
    }

    pub fn toggle_all_visible(&mut self) {
        let visible: Vec<UserId> = self.visible().into_iter().map(|user| user.id).collect();
        self.state.selection.toggle_all(&visible);
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub async fn refresh(&mut self) {
        self.state.busy = true;
        let outcome = self.gateway.list().await;
        match outcome {
            Ok(records) => {
                debug!(count = records.len(), "refreshed user collection");
                self.state.store.replace_all(records);
            }
            Err(err) => self.notices.error(err.surface("Failed to load users")),
        }
        self.state.busy = false;
    }

    pub async fn delete(&mut self, id: &UserId) {
        self.state.busy = true;
        let outcome = self.gateway.delete(id).await;
        match outcome {
            Ok(()) => {
                self.notices.success("User deleted successfully");
                self.refresh().await;
            }
            Err(err) => self.notices.error(err.surface("Failed to delete user")),
        }
        self.state.busy = false;
    }

    pub async fn bulk_delete(&mut self) {
        if self.state.selection.is_empty() {
            self.notices.warning("Please select users to delete");
            return;
        }
        self.state.busy = true;
        let outcome = self.gateway.bulk_delete(self.state.selection.ids()).await;
        match outcome {
            Ok(deleted) => {
                self.notices
                    .success(format!("{deleted} users deleted successfully"));
                self.refresh().await;
                self.state.selection.clear();
            }
            Err(err) => self.notices.error(err.surface("Failed to delete users")),
        }
        self.state.busy = false;
    }

    pub fn export_sheet(&self) -> ReportSheet {
        let sheet = ReportSheet::for_users(&self.visible(), Utc::now());
        self.notices.success("Report generated successfully");
        sheet
    }
}

/// Controller for the summary view: read-only stores for both entity types
/// plus the aggregator. Both collections are fetched concurrently and the
/// snapshot is only rebuilt when both arrive; one failed fetch leaves the
/// zero-valued default and a single load-failure notice.
pub struct DashboardPage {
    users: Arc<dyn UserDirectory>,
    svcs: Arc<dyn SvcDirectory>,
    user_store: RecordStore<UserRecord>,
    svc_store: RecordStore<SvcRecord>,
    snapshot: DashboardSnapshot,
    loading: bool,
    notices: NoticeBus,
}

impl DashboardPage {
    pub fn new(users: Arc<dyn UserDirectory>, svcs: Arc<dyn SvcDirectory>) -> Self {
        Self::with_notices(users, svcs, NoticeBus::new())
    }

    pub fn with_notices(
        users: Arc<dyn UserDirectory>,
        svcs: Arc<dyn SvcDirectory>,
        notices: NoticeBus,
    ) -> Self {
        Self {
            users,
            svcs,
            user_store: RecordStore::new(),
            svc_store: RecordStore::new(),
            snapshot: DashboardSnapshot::default(),
            loading: false,
            notices,
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub async fn reload(&mut self) {
        self.loading = true;
        let fetched = tokio::try_join!(self.users.list(), self.svcs.list());
        match fetched {
            Ok((users, svcs)) => {
                self.user_store.replace_all(users);
                self.svc_store.replace_all(svcs);
                self.snapshot = summarize(
                    self.user_store.records(),
                    self.svc_store.records(),
                    Utc::now(),
                );
            }
            Err(err) => {
                self.snapshot = DashboardSnapshot::default();
                self.notices
                    .error(err.surface("Failed to load dashboard data"));
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
#[path = "tests/pages_tests.rs"]
mod tests;
