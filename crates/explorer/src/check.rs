use std::sync::Arc;

use interaction_check_domain::{
    CheckContext, ExplorerConfig, WalletAddress, FETCH_ERROR_MESSAGE, RECEIVER_ADDRESS,
};
use metrics::counter;
use tracing::{info, warn};

use crate::{history::fetch_all_transactions, scanner::find_interaction, source::ExplorerSource};

/// Runs one full check for `context.address` against the fixed receiver and
/// returns the updated context.
///
/// A blank address only sets the validation message; no request is made.
/// A truncated history sets the generic fetch error but the partial history
/// is still scanned, so `result` is always present once the address is valid.
pub async fn check_interaction<S>(
    source: &S,
    mut context: CheckContext,
    max_pages: u32,
) -> CheckContext
where
    S: ExplorerSource + ?Sized,
{
    let address = match WalletAddress::parse(&context.address) {
        Ok(address) => address,
        Err(err) => {
            counter!("explorer_checks_total", "outcome" => "invalid_address").increment(1);
            context.error = Some(err.to_string());
            return context;
        }
    };

    context.begin();

    let history = fetch_all_transactions(source, address.as_str(), max_pages).await;
    if let Some(interruption) = &history.interruption {
        warn!(
            %address,
            reason = %interruption,
            fetched = history.transactions.len(),
            "history incomplete"
        );
        context.error = Some(FETCH_ERROR_MESSAGE.to_string());
    }

    let result = find_interaction(
        source,
        &history.transactions,
        address.as_str(),
        RECEIVER_ADDRESS,
    )
    .await;

    let outcome = match (result.is_found(), history.is_complete()) {
        (true, _) => "found",
        (false, true) => "not_found",
        (false, false) => "incomplete",
    };
    counter!("explorer_checks_total", "outcome" => outcome).increment(1);
    info!(%address, outcome, txid = ?result.matched_transaction_id(), "check finished");

    context.result = Some(result);
    context.finish();
    context
}

/// A shareable handle that owns the explorer source and the page bound so
/// shells only deal in addresses and contexts.
#[derive(Clone)]
pub struct InteractionChecker {
    source: Arc<dyn ExplorerSource>,
    max_pages: u32,
}

impl InteractionChecker {
    pub fn new(source: Arc<dyn ExplorerSource>, max_pages: u32) -> Self {
        Self {
            source,
            max_pages: max_pages.max(1),
        }
    }

    pub fn from_config(source: Arc<dyn ExplorerSource>, config: &ExplorerConfig) -> Self {
        Self::new(source, config.max_pages())
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub async fn run(&self, context: CheckContext) -> CheckContext {
        check_interaction(self.source.as_ref(), context, self.max_pages).await
    }

    pub async fn check(&self, address: impl Into<String>) -> CheckContext {
        self.run(CheckContext::new(address)).await
    }
}
