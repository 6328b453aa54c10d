// Tabdeck Library Entry Point
// This file exposes all modules so they can be imported by an embedding
// application and tested independently.
//
// The crate keeps an in-memory snapshot of the tabs open in one collection
// scope, lets callers filter it, and dispatches group/close commands to an
// abstract host without ever letting the view diverge from host truth.

// Host boundary
pub mod host;

// Shared state
pub mod state;

// Session change notifications
pub mod events;

// Pure logic modules (no host imports except commands/sync, which take the
// host as a parameter)
pub mod modules;

// Facade tying state + host + modules together
pub mod session;

pub use events::SessionEvent;
pub use host::{GroupHandle, HostError, TabHost, TabScope};
pub use modules::commands::{close_tab, group_tabs, CommandError, DEFAULT_GROUP_LABEL};
pub use modules::filter::{visible, visible_ids};
pub use modules::sync::sync_tabs;
pub use session::Session;
pub use state::{ClosedTab, SessionState, Tab, TabId, UNTITLED_TAB};
