// Abstract tab host boundary.
// The real registry (browser window, extension API bridge, ...) lives behind
// this trait; the core never talks to a concrete host API directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{Tab, TabId};

/// Opaque group identifier handed back by the host after a group operation.
/// Used only to apply follow-up appearance settings, never stored long-term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupHandle(pub i64);

impl std::fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which collection of tabs an enumeration covers. The session operates on a
/// single scope at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabScope {
    #[default]
    CurrentWindow,
    Window(u32),
}

/// Failures reported by the host layer.
#[derive(Debug, Error)]
pub enum HostError {
    /// The id is not a currently valid open-tab id.
    #[error("tab {0} not found at host")]
    TabNotFound(TabId),
    /// The host layer itself failed; retryable, id validity unknown.
    #[error("host unavailable: {0}")]
    Unavailable(String),
    /// The host refused the request (e.g. missing permission). Not retryable.
    #[error("host rejected request: {0}")]
    Rejected(String),
}

impl HostError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, HostError::Unavailable(_))
    }
}

/// Operations the host registry must provide. All calls are async and
/// non-cancelable once dispatched; the core imposes no timeout.
#[allow(async_fn_in_trait)]
pub trait TabHost: Send + Sync {
    /// Enumerate all tabs in a collection scope, in host order.
    async fn enumerate(&self, scope: TabScope) -> Result<Vec<Tab>, HostError>;

    /// Form a group from exactly `tab_ids`. Fails with `TabNotFound` if any
    /// id is no longer a valid open tab.
    async fn group(&self, tab_ids: &[TabId]) -> Result<GroupHandle, HostError>;

    /// Set a group's display label and collapsed state.
    async fn set_group_appearance(
        &self,
        handle: GroupHandle,
        label: &str,
        collapsed: bool,
    ) -> Result<(), HostError>;

    /// Remove the tab with `id`. `TabNotFound` means some other actor already
    /// closed it; callers normalize that to success.
    async fn close_tab(&self, id: TabId) -> Result<(), HostError>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::state::Tab;

    /// Scripted in-memory host for command and sync tests.
    pub struct MockHost {
        pub tabs: Mutex<Vec<Tab>>,
        pub groups: Mutex<Vec<(GroupHandle, Vec<TabId>)>>,
        pub appearances: Mutex<Vec<(GroupHandle, String, bool)>>,
        next_group: AtomicI64,
        pub close_calls: AtomicUsize,
        pub group_calls: AtomicUsize,
        pub enumerate_calls: AtomicUsize,
        pub unavailable: AtomicBool,
        pub fail_appearance: AtomicBool,
        pub reject_close: AtomicBool,
    }

    impl MockHost {
        pub fn with_tabs(tabs: Vec<Tab>) -> Self {
            Self {
                tabs: Mutex::new(tabs),
                groups: Mutex::new(Vec::new()),
                appearances: Mutex::new(Vec::new()),
                next_group: AtomicI64::new(100),
                close_calls: AtomicUsize::new(0),
                group_calls: AtomicUsize::new(0),
                enumerate_calls: AtomicUsize::new(0),
                unavailable: AtomicBool::new(false),
                fail_appearance: AtomicBool::new(false),
                reject_close: AtomicBool::new(false),
            }
        }

        /// Simulate an external actor closing a tab behind the tool's back.
        pub fn externally_close(&self, id: TabId) {
            self.tabs.lock().unwrap().retain(|t| t.id != id);
        }

        fn check_available(&self) -> Result<(), HostError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(HostError::Unavailable("mock host down".into()))
            } else {
                Ok(())
            }
        }
    }

    impl TabHost for MockHost {
        async fn enumerate(&self, _scope: TabScope) -> Result<Vec<Tab>, HostError> {
            self.enumerate_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            Ok(self.tabs.lock().unwrap().clone())
        }

        async fn group(&self, tab_ids: &[TabId]) -> Result<GroupHandle, HostError> {
            self.group_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            let tabs = self.tabs.lock().unwrap();
            for id in tab_ids {
                if !tabs.iter().any(|t| t.id == *id) {
                    return Err(HostError::TabNotFound(*id));
                }
            }
            let handle = GroupHandle(self.next_group.fetch_add(1, Ordering::SeqCst));
            self.groups.lock().unwrap().push((handle, tab_ids.to_vec()));
            Ok(handle)
        }

        async fn set_group_appearance(
            &self,
            handle: GroupHandle,
            label: &str,
            collapsed: bool,
        ) -> Result<(), HostError> {
            self.check_available()?;
            if self.fail_appearance.load(Ordering::SeqCst) {
                return Err(HostError::Rejected("appearance update refused".into()));
            }
            self.appearances
                .lock()
                .unwrap()
                .push((handle, label.to_string(), collapsed));
            Ok(())
        }

        async fn close_tab(&self, id: TabId) -> Result<(), HostError> {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            if self.reject_close.load(Ordering::SeqCst) {
                return Err(HostError::Rejected("close not permitted".into()));
            }
            let mut tabs = self.tabs.lock().unwrap();
            let before = tabs.len();
            tabs.retain(|t| t.id != id);
            if tabs.len() == before {
                return Err(HostError::TabNotFound(id));
            }
            Ok(())
        }
    }
}
