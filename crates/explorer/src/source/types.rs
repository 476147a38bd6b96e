//! Wire shapes returned by Esplora-compatible explorers (mempool.space,
//! blockstream.info). Only the fields matching needs are kept; everything
//! else in the payload is ignored by serde.

use interaction_check_domain::{TransactionDetail, TransactionSummary, TxInput, TxOutput};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EsploraTxSummary {
    pub txid: String,
}

#[derive(Debug, Deserialize)]
pub struct EsploraTx {
    pub txid: String,
    #[serde(default)]
    pub vin: Vec<EsploraVin>,
    #[serde(default)]
    pub vout: Vec<EsploraVout>,
}

#[derive(Debug, Deserialize)]
pub struct EsploraVin {
    /// `null` for coinbase inputs.
    #[serde(default)]
    pub prevout: Option<EsploraVout>,
}

#[derive(Debug, Deserialize)]
pub struct EsploraVout {
    /// `null` for OP_RETURN and other non-standard scripts.
    #[serde(default)]
    pub scriptpubkey_address: Option<String>,
    #[serde(default)]
    pub value: u64,
}

impl From<EsploraTxSummary> for TransactionSummary {
    fn from(value: EsploraTxSummary) -> Self {
        TransactionSummary::new(value.txid)
    }
}

impl From<EsploraTx> for TransactionDetail {
    fn from(value: EsploraTx) -> Self {
        TransactionDetail {
            txid: value.txid,
            inputs: value
                .vin
                .into_iter()
                .map(|vin| TxInput {
                    funding_address: vin.prevout.and_then(|prev| prev.scriptpubkey_address),
                })
                .collect(),
            outputs: value
                .vout
                .into_iter()
                .map(|vout| TxOutput {
                    address: vout.scriptpubkey_address,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TX: &str = r#"{
        "txid": "9f2c",
        "version": 2,
        "vin": [
            {
                "txid": "0000",
                "vout": 4294967295,
                "prevout": null,
                "is_coinbase": true
            },
            {
                "txid": "aaaa",
                "vout": 1,
                "prevout": {
                    "scriptpubkey": "0014",
                    "scriptpubkey_type": "v0_p2wpkh",
                    "scriptpubkey_address": "tb1qsender",
                    "value": 5000
                },
                "is_coinbase": false
            }
        ],
        "vout": [
            { "scriptpubkey": "6a", "scriptpubkey_type": "op_return", "value": 0 },
            {
                "scriptpubkey": "0014",
                "scriptpubkey_type": "v0_p2wpkh",
                "scriptpubkey_address": "tb1qqw5qvg0u4rw7wy0eu9mtlmfze6ra7z0xnlwrl8",
                "value": 4000
            }
        ],
        "status": { "confirmed": true, "block_height": 200000 }
    }"#;

    #[test]
    fn decodes_esplora_transaction_with_coinbase_and_op_return() {
        let tx: EsploraTx = serde_json::from_str(SAMPLE_TX).expect("payload decodes");
        let detail = TransactionDetail::from(tx);

        assert_eq!(detail.txid, "9f2c");
        assert_eq!(detail.inputs.len(), 2);
        assert_eq!(detail.inputs[0].funding_address, None);
        assert_eq!(detail.inputs[1].funding_address.as_deref(), Some("tb1qsender"));
        assert_eq!(detail.outputs[0].address, None);
        assert!(detail.is_interaction(
            "tb1qsender",
            interaction_check_domain::RECEIVER_ADDRESS
        ));
    }

    #[test]
    fn listing_page_decodes_as_summaries() {
        let page = format!("[{SAMPLE_TX}, {{\"txid\": \"beef\"}}]");
        let summaries: Vec<EsploraTxSummary> = serde_json::from_str(&page).expect("page decodes");
        let txids: Vec<TransactionSummary> =
            summaries.into_iter().map(TransactionSummary::from).collect();
        assert_eq!(
            txids,
            vec![TransactionSummary::new("9f2c"), TransactionSummary::new("beef")]
        );
    }
}
