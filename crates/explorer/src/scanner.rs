use interaction_check_domain::{InteractionResult, TransactionDetail, TransactionSummary};
use metrics::counter;
use tracing::{debug, info, warn};

use crate::source::ExplorerSource;

/// Fetches one transaction. Any failure is logged and reported as `None`.
pub async fn fetch_transaction_detail<S>(source: &S, txid: &str) -> Option<TransactionDetail>
where
    S: ExplorerSource + ?Sized,
{
    match source.transaction(txid).await {
        Ok(detail) => {
            counter!("explorer_requests_total", "endpoint" => "transaction", "result" => "ok")
                .increment(1);
            Some(detail)
        }
        Err(err) => {
            counter!("explorer_requests_total", "endpoint" => "transaction", "result" => "error")
                .increment(1);
            warn!(txid, error = %err, "transaction detail fetch failed; skipping");
            None
        }
    }
}

/// Looks for the first transaction, in `summaries` order, where `sender`
/// funded an input and `receiver` owns an output.
///
/// Details are fetched one at a time and the scan stops at the first match,
/// so later transactions are never requested. Transactions whose detail
/// cannot be fetched are skipped.
pub async fn find_interaction<S>(
    source: &S,
    summaries: &[TransactionSummary],
    sender: &str,
    receiver: &str,
) -> InteractionResult
where
    S: ExplorerSource + ?Sized,
{
    for summary in summaries {
        let Some(detail) = fetch_transaction_detail(source, &summary.txid).await else {
            continue;
        };

        if detail.is_interaction(sender, receiver) {
            info!(txid = %summary.txid, sender, receiver, "interaction found");
            return InteractionResult::found(summary.txid.clone());
        }
    }

    debug!(sender, scanned = summaries.len(), "no interaction found");
    InteractionResult::not_found()
}
