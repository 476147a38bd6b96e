use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use interaction_check_domain::{CheckContext, InteractionResult, WalletAddress};
use metrics::counter;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize, Serialize)]
pub struct InteractionRequest {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckStatus {
    Found,
    NotFound,
    /// History could not be read to the end; a negative answer is not final.
    Incomplete,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub status: CheckStatus,
    #[serde(flatten)]
    pub result: InteractionResult,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

pub async fn interaction_handler(
    state: web::Data<AppState>,
    payload: web::Json<InteractionRequest>,
) -> Result<HttpResponse, ApiError> {
    let address = WalletAddress::parse(&payload.address).inspect_err(|_| {
        counter!("api_interaction_requests_total", "status" => "invalid_address").increment(1);
    })?;

    let Some(_permit) = state.try_begin_check(&address) else {
        counter!("api_interaction_requests_total", "status" => "in_progress").increment(1);
        return Err(ApiError::CheckInProgress);
    };

    let context = state
        .checker()
        .run(CheckContext::new(address.into_inner()))
        .await;
    let CheckContext { result, error, .. } = context;
    // The address was validated above, so the check always produces a result.
    let result = result.unwrap_or_else(InteractionResult::not_found);

    let status = match (result.is_found(), error.is_some()) {
        (true, _) => CheckStatus::Found,
        (false, false) => CheckStatus::NotFound,
        (false, true) => CheckStatus::Incomplete,
    };
    let status_tag = status.as_ref().to_owned();
    counter!("api_interaction_requests_total", "status" => status_tag).increment(1);

    Ok(HttpResponse::Ok().json(InteractionResponse {
        status,
        result,
        error,
        checked_at: Utc::now(),
    }))
}
