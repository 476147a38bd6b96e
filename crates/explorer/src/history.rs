use std::collections::HashSet;

use interaction_check_domain::TransactionSummary;
use metrics::{counter, histogram};
use thiserror::Error;
use tracing::{debug, warn};

use crate::source::{ExplorerError, ExplorerSource};

/// Why a history walk stopped before the explorer returned an empty page.
#[derive(Debug, Error)]
pub enum HistoryInterruption {
    #[error("history page request failed: {0}")]
    Request(#[from] ExplorerError),
    #[error("explorer repeated cursor `{cursor}`")]
    CursorStalled { cursor: String },
    #[error("stopped after {pages} pages")]
    PageLimit { pages: u32 },
}

/// Everything learned about an address, in the order the explorer returned it.
#[derive(Debug, Default)]
pub struct History {
    pub transactions: Vec<TransactionSummary>,
    pub interruption: Option<HistoryInterruption>,
}

impl History {
    pub fn is_complete(&self) -> bool {
        self.interruption.is_none()
    }
}

/// Walks every history page for `address`, chaining on the last txid of each
/// page until an empty page comes back.
///
/// A failed page does not fail the walk: the pages gathered so far are
/// returned and the cause is kept in `History::interruption`. At most
/// `max_pages` requests are made, and a cursor the explorer already handed
/// out ends the walk instead of looping.
pub async fn fetch_all_transactions<S>(source: &S, address: &str, max_pages: u32) -> History
where
    S: ExplorerSource + ?Sized,
{
    let mut history = History::default();
    let mut cursor: Option<String> = None;
    let mut seen_cursors: HashSet<String> = HashSet::new();
    let mut pages: u32 = 0;

    loop {
        if pages >= max_pages {
            warn!(address, pages, "history page limit reached; keeping partial history");
            history.interruption = Some(HistoryInterruption::PageLimit { pages });
            break;
        }

        let page = match source.list_transactions(address, cursor.as_deref()).await {
            Ok(page) => page,
            Err(err) => {
                counter!("explorer_requests_total", "endpoint" => "history", "result" => "error")
                    .increment(1);
                warn!(
                    address,
                    cursor = ?cursor,
                    error = %err,
                    "history page fetch failed; keeping partial history"
                );
                history.interruption = Some(HistoryInterruption::Request(err));
                break;
            }
        };
        counter!("explorer_requests_total", "endpoint" => "history", "result" => "ok").increment(1);
        pages += 1;

        let Some(last) = page.last() else {
            break;
        };
        let next_cursor = last.txid.clone();
        if !seen_cursors.insert(next_cursor.clone()) {
            warn!(address, cursor = %next_cursor, "explorer returned an already used cursor");
            history.interruption = Some(HistoryInterruption::CursorStalled {
                cursor: next_cursor,
            });
            break;
        }

        debug!(address, page = pages, entries = page.len(), "history page fetched");
        history.transactions.extend(page);
        cursor = Some(next_cursor);
    }

    histogram!("explorer_history_transactions").record(history.transactions.len() as f64);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{summaries, StubSource};

    const ADDRESS: &str = "tb1qsender";

    #[tokio::test]
    async fn empty_history_yields_empty_sequence() {
        let source = StubSource::new();

        let history = fetch_all_transactions(&source, ADDRESS, 10).await;

        assert!(history.transactions.is_empty());
        assert!(history.is_complete());
        assert_eq!(source.list_calls(), vec![None]);
    }

    #[tokio::test]
    async fn chains_pages_on_last_txid() {
        let source = StubSource::new()
            .with_page(None, &["t1", "t2", "t3"])
            .with_page(Some("t3"), &["t4", "t5"])
            .with_page(Some("t5"), &["t6"]);

        let history = fetch_all_transactions(&source, ADDRESS, 10).await;

        assert!(history.is_complete());
        assert_eq!(
            history.transactions,
            summaries(&["t1", "t2", "t3", "t4", "t5", "t6"])
        );
        assert_eq!(
            source.list_calls(),
            vec![
                None,
                Some("t3".to_string()),
                Some("t5".to_string()),
                Some("t6".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failure_on_second_page_keeps_first_page() {
        let source = StubSource::new()
            .with_page(None, &["t1", "t2"])
            .with_failing_page(Some("t2"));

        let history = fetch_all_transactions(&source, ADDRESS, 10).await;

        assert_eq!(history.transactions, summaries(&["t1", "t2"]));
        assert!(matches!(
            history.interruption,
            Some(HistoryInterruption::Request(_))
        ));
    }

    #[tokio::test]
    async fn failure_on_first_page_yields_nothing() {
        let source = StubSource::new().with_failing_page(None);

        let history = fetch_all_transactions(&source, ADDRESS, 10).await;

        assert!(history.transactions.is_empty());
        assert!(!history.is_complete());
    }

    #[tokio::test]
    async fn repeated_cursor_stops_the_walk() {
        let source = StubSource::new()
            .with_page(None, &["t1", "t2"])
            .with_page(Some("t2"), &["t2"]);

        let history = fetch_all_transactions(&source, ADDRESS, 10).await;

        assert_eq!(history.transactions, summaries(&["t1", "t2"]));
        assert!(matches!(
            history.interruption,
            Some(HistoryInterruption::CursorStalled { ref cursor }) if cursor == "t2"
        ));
        assert_eq!(source.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn page_limit_bounds_requests() {
        let source = StubSource::new()
            .with_page(None, &["t1"])
            .with_page(Some("t1"), &["t2"])
            .with_page(Some("t2"), &["t3"]);

        let history = fetch_all_transactions(&source, ADDRESS, 2).await;

        assert_eq!(history.transactions, summaries(&["t1", "t2"]));
        assert!(matches!(
            history.interruption,
            Some(HistoryInterruption::PageLimit { pages: 2 })
        ));
        assert_eq!(source.list_calls().len(), 2);
    }
}
