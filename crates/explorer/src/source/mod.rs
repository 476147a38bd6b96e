use async_trait::async_trait;
use interaction_check_domain::{ExplorerConfig, TransactionDetail, TransactionSummary};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod types;

pub use types::{EsploraTx, EsploraTxSummary, EsploraVin, EsploraVout};

const USER_AGENT: &str = concat!("interaction-check/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("explorer request failed: {0}")]
    Transport(String),
    #[error("explorer returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("failed to decode explorer response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ExplorerError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// The two explorer calls a check needs. Kept narrow so the history and
/// scanning logic can run against stub data.
#[async_trait]
pub trait ExplorerSource: Send + Sync {
    /// One page of an address's history, newest first. `after_txid` is the
    /// last txid of the previous page; `None` requests the first page.
    async fn list_transactions(
        &self,
        address: &str,
        after_txid: Option<&str>,
    ) -> Result<Vec<TransactionSummary>, ExplorerError>;

    async fn transaction(&self, txid: &str) -> Result<TransactionDetail, ExplorerError>;
}

/// `ExplorerSource` backed by an Esplora REST endpoint.
#[derive(Clone)]
pub struct EsploraSource {
    client: Client,
    base_url: String,
}

impl EsploraSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ExplorerError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn history_url(&self, address: &str, after_txid: Option<&str>) -> String {
        let address = urlencoding::encode(address);
        match after_txid {
            Some(cursor) => format!(
                "{}/address/{}/txs/chain/{}",
                self.base_url,
                address,
                urlencoding::encode(cursor)
            ),
            None => format!("{}/address/{}/txs", self.base_url, address),
        }
    }

    fn transaction_url(&self, txid: &str) -> String {
        format!("{}/tx/{}", self.base_url, urlencoding::encode(txid))
    }

    async fn get_json<T>(&self, url: &str) -> Result<T, ExplorerError>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ExplorerSource for EsploraSource {
    async fn list_transactions(
        &self,
        address: &str,
        after_txid: Option<&str>,
    ) -> Result<Vec<TransactionSummary>, ExplorerError> {
        let url = self.history_url(address, after_txid);
        let page: Vec<EsploraTxSummary> = self.get_json(&url).await?;
        Ok(page.into_iter().map(TransactionSummary::from).collect())
    }

    async fn transaction(&self, txid: &str) -> Result<TransactionDetail, ExplorerError> {
        let url = self.transaction_url(txid);
        let tx: EsploraTx = self.get_json(&url).await?;
        Ok(tx.into())
    }
}
