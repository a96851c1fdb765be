use serde_json::{Value, json};
use tracing::{info, warn};

use crate::content_api::ContentApi;
use crate::error::{ProxyError, Result};
use crate::extract::{PollFailurePolicy, SearchDomain, extract_search_id};
use crate::poll::{OffersPoller, PollOutcome};

/// Run one search end to end: create the search resource upstream, pull the
/// search id out of the `Location` header, then poll its offers endpoint.
///
/// The body is forwarded verbatim; only emptiness is validated here, before
/// any upstream call is made.
pub async fn run_search(
    api: &ContentApi,
    domain: &SearchDomain,
    body: Value,
) -> Result<Value> {
    match body.as_object() {
        Some(fields) if !fields.is_empty() => {}
        _ => return Err(ProxyError::BadRequest("Invalid JSON".to_string())),
    }

    let location = api.create_search(domain, &body).await?;
    let search_id = extract_search_id(domain, &location)?;
    info!("extracted search id: {search_id}");

    match OffersPoller::new(api, domain).run(&search_id).await? {
        PollOutcome::Ready(payload) => Ok(payload),
        PollOutcome::Empty => Ok(empty_items()),
        PollOutcome::Failed { status, body } => {
            warn!("poll for {search_id} failed with status {status}");
            match domain.poll_failure {
                PollFailurePolicy::EmptyResults => Ok(empty_items()),
                PollFailurePolicy::RelayUpstream if status == 202 => Err(ProxyError::PollTimeout {
                    attempts: api.max_poll_attempts(),
                }),
                PollFailurePolicy::RelayUpstream => Err(ProxyError::PollFailed { status, body }),
            }
        }
    }
}

fn empty_items() -> Value {
    json!({ "items": [] })
}
