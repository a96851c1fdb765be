use serde_json::Value;
use tracing::{debug, info, warn};

use crate::content_api::ContentApi;
use crate::error::Result;
use crate::extract::SearchDomain;

/// Terminal result of one poll loop. Created fresh per search, never kept.
#[derive(Debug)]
pub enum PollOutcome {
    /// 200 with a JSON object body.
    Ready(Value),
    /// 200 with an empty or non-JSON body.
    Empty,
    /// Any other status, including a 202 once the attempt budget is spent.
    Failed { status: u16, body: String },
}

/// Polls the offers endpoint of a search resource until it leaves the
/// pending state or the attempt budget runs out. Fixed delay between
/// attempts, no backoff; worst case wall-clock is interval * (attempts - 1).
pub struct OffersPoller<'a> {
    api: &'a ContentApi,
    domain: &'a SearchDomain,
}

impl<'a> OffersPoller<'a> {
    pub fn new(api: &'a ContentApi, domain: &'a SearchDomain) -> Self {
        Self { api, domain }
    }

    pub async fn run(&self, search_id: &str) -> Result<PollOutcome> {
        let max_attempts = self.api.max_poll_attempts();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!("offers poll attempt {attempt}/{max_attempts} for {search_id}");

            let resp = self.api.offers_attempt(self.domain, search_id).await?;
            match resp.status {
                200 => {
                    let text = resp.body.trim();
                    // The upstream occasionally answers 200 with an empty or
                    // non-JSON body before offers exist.
                    if text.starts_with('{') && text.ends_with('}') {
                        info!("offers ready for {search_id}");
                        return Ok(PollOutcome::Ready(serde_json::from_str(text)?));
                    }
                    info!("offers endpoint returned 200 with no usable body for {search_id}");
                    return Ok(PollOutcome::Empty);
                }
                202 if attempt < max_attempts => {
                    debug!("offers not ready yet (202), sleeping {:?}", self.api.poll_interval());
                    tokio::time::sleep(self.api.poll_interval()).await;
                }
                status => {
                    warn!(
                        "offers polling for {search_id} ended with status {status} on attempt {attempt}"
                    );
                    return Ok(PollOutcome::Failed {
                        status,
                        body: resp.body,
                    });
                }
            }
        }
    }
}
