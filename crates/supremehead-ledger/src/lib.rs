//! Codex ledger: append-only JSONL audit trail for scroll ingestions.

mod ledger;

pub use ledger::{CodexLedger, LedgerEntry, LedgerEvent};
