// Module exports for pure logic
pub mod filter;      // Snapshot filtering logic
pub mod commands;    // Group/close dispatch and reconciliation
pub mod sync;        // Host enumeration -> snapshot replace
pub mod closed_tabs; // Tab archival logic
