// Recently-closed archive.
// In-memory only: the session keeps a bounded stack of tabs it confirmed
// closed, so an embedding UI can offer "reopen" without any persistence.

use log::debug;

use crate::state::{ClosedTab, SessionState, Tab};

const MAX_CLOSED_TABS: usize = 25;

/// Archives a tab to the closed tabs stack.
pub fn archive_tab(state: &SessionState, tab: &Tab) {
    let closed_tab = ClosedTab::from(tab);
    let mut closed = state.closed_tabs.lock().unwrap();

    closed.push_back(closed_tab);

    // Bounded to 25 entries (FIFO eviction)
    if closed.len() > MAX_CLOSED_TABS {
        closed.pop_front();
    }

    debug!("[ClosedTabs] Archived tab {} '{}'", tab.id, tab.display_title());
}

/// Retrieves the most recently closed tab (LIFO).
pub fn pop_closed_tab(state: &SessionState) -> Option<ClosedTab> {
    let mut closed = state.closed_tabs.lock().unwrap();
    closed.pop_back()
}

/// Count of archived closed tabs (for UI).
pub fn closed_tab_count(state: &SessionState) -> usize {
    let closed = state.closed_tabs.lock().unwrap();
    closed.len()
}
