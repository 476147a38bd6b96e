//! Deterministic `ExplorerSource` used by the unit tests in this crate.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use interaction_check_domain::{TransactionDetail, TransactionSummary, TxInput, TxOutput};

use crate::source::{ExplorerError, ExplorerSource};

#[derive(Default)]
pub struct StubSource {
    pages: HashMap<Option<String>, Vec<String>>,
    failing_pages: HashSet<Option<String>>,
    details: HashMap<String, TransactionDetail>,
    failing_details: HashSet<String>,
    list_calls: Mutex<Vec<Option<String>>>,
    detail_calls: Mutex<Vec<String>>,
    detail_count: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the page returned for `cursor`. Unregistered cursors answer
    /// with an empty page.
    pub fn with_page(mut self, cursor: Option<&str>, txids: &[&str]) -> Self {
        self.pages.insert(
            cursor.map(str::to_owned),
            txids.iter().map(|txid| txid.to_string()).collect(),
        );
        self
    }

    pub fn with_failing_page(mut self, cursor: Option<&str>) -> Self {
        self.failing_pages.insert(cursor.map(str::to_owned));
        self
    }

    pub fn with_detail(mut self, detail: TransactionDetail) -> Self {
        self.details.insert(detail.txid.clone(), detail);
        self
    }

    pub fn with_failing_detail(mut self, txid: &str) -> Self {
        self.failing_details.insert(txid.to_string());
        self
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub fn detail_count(&self) -> usize {
        self.detail_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExplorerSource for StubSource {
    async fn list_transactions(
        &self,
        _address: &str,
        after_txid: Option<&str>,
    ) -> Result<Vec<TransactionSummary>, ExplorerError> {
        let cursor = after_txid.map(str::to_owned);
        self.list_calls.lock().unwrap().push(cursor.clone());
        if self.failing_pages.contains(&cursor) {
            return Err(ExplorerError::Transport("connection reset".into()));
        }
        Ok(self
            .pages
            .get(&cursor)
            .map(|txids| txids.iter().map(TransactionSummary::new).collect())
            .unwrap_or_default())
    }

    async fn transaction(&self, txid: &str) -> Result<TransactionDetail, ExplorerError> {
        self.detail_count.fetch_add(1, Ordering::SeqCst);
        self.detail_calls.lock().unwrap().push(txid.to_string());
        if self.failing_details.contains(txid) {
            return Err(ExplorerError::Status {
                status: 503,
                url: format!("stub://tx/{txid}"),
            });
        }
        self.details.get(txid).cloned().ok_or(ExplorerError::Status {
            status: 404,
            url: format!("stub://tx/{txid}"),
        })
    }
}

/// Builds a detail with the given input owners and output destinations.
pub fn detail(txid: &str, inputs: &[Option<&str>], outputs: &[Option<&str>]) -> TransactionDetail {
    TransactionDetail {
        txid: txid.to_string(),
        inputs: inputs
            .iter()
            .map(|address| TxInput {
                funding_address: address.map(str::to_owned),
            })
            .collect(),
        outputs: outputs
            .iter()
            .map(|address| TxOutput {
                address: address.map(str::to_owned),
            })
            .collect(),
    }
}

pub fn summaries(txids: &[&str]) -> Vec<TransactionSummary> {
    txids.iter().map(|txid| TransactionSummary::new(*txid)).collect()
}
