// Session facade.
// Owns the shared state and the host handle, and wires the pure modules
// together the way a popup front-end consumes them: sync once, filter on
// every keystroke, dispatch group/close on clicks.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::events::SessionEvent;
use crate::host::{GroupHandle, TabHost, TabScope};
use crate::modules::commands::{self, CommandError, DEFAULT_GROUP_LABEL};
use crate::modules::{closed_tabs, filter, sync};
use crate::state::{ClosedTab, SessionState, Tab, TabId};

pub struct Session<H: TabHost> {
    state: Arc<SessionState>,
    host: H,
    scope: TabScope,
}

impl<H: TabHost> Session<H> {
    /// New session over the current window. The snapshot stays empty until
    /// the first `sync`.
    pub fn new(host: H) -> Self {
        Self::with_scope(host, TabScope::CurrentWindow)
    }

    pub fn with_scope(host: H, scope: TabScope) -> Self {
        Self {
            state: Arc::new(SessionState::new()),
            host,
            scope,
        }
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.state.subscribe()
    }

    /// Initial load, and on-demand full re-sync thereafter.
    pub async fn sync(&self) -> Result<usize, CommandError> {
        sync::sync_tabs(&self.state, &self.host, self.scope).await
    }

    /// Filtered view of the current snapshot. Pure read; clones the matched
    /// tabs so the caller holds no lock on the store.
    pub fn visible(&self, search_term: &str) -> Vec<Tab> {
        let snapshot = self.state.snapshot();
        filter::visible(&snapshot, search_term)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn group_tabs(
        &self,
        tab_ids: &[TabId],
        label: &str,
    ) -> Result<Option<GroupHandle>, CommandError> {
        commands::group_tabs(&self.state, &self.host, tab_ids, label).await
    }

    /// The popup's "Group Tabs" button: group everything currently visible
    /// for `search_term` under the default label.
    pub async fn group_visible(
        &self,
        search_term: &str,
    ) -> Result<Option<GroupHandle>, CommandError> {
        let snapshot = self.state.snapshot();
        let ids = filter::visible_ids(&snapshot, search_term);
        commands::group_tabs(&self.state, &self.host, &ids, DEFAULT_GROUP_LABEL).await
    }

    pub async fn close_tab(&self, id: TabId) -> Result<(), CommandError> {
        commands::close_tab(&self.state, &self.host, id).await
    }

    pub fn pop_recently_closed(&self) -> Option<ClosedTab> {
        closed_tabs::pop_closed_tab(&self.state)
    }

    pub fn recently_closed_count(&self) -> usize {
        closed_tabs::closed_tab_count(&self.state)
    }
}
