//! Block-explorer client plus the history walk and input/output scan that
//! decide whether a wallet ever paid the fixed receiver. The CLI in
//! `main.rs` and the HTTP API both drive `check_interaction` from here.

pub mod check;
pub mod history;
pub mod scanner;
pub mod source;

#[cfg(test)]
mod testing;

pub use check::{check_interaction, InteractionChecker};
pub use history::{fetch_all_transactions, History, HistoryInterruption};
pub use scanner::{fetch_transaction_detail, find_interaction};
pub use source::{EsploraSource, ExplorerError, ExplorerSource};
