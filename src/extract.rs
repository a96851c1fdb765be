use crate::error::ProxyError;

/// What to do when the offers poll ends in a failure outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollFailurePolicy {
    /// Degrade to `{"items": []}` and report success to the client.
    EmptyResults,
    /// Relay the upstream status and body (JSON when parseable) to the client.
    RelayUpstream,
}

/// Per-domain tokens for the search protocol. The upstream API exposes the
/// same create-then-poll contract for flights and trains; only the resource
/// kind, the id prefix and the failure relay behavior differ.
#[derive(Debug)]
pub struct SearchDomain {
    pub kind: &'static str,
    pub id_prefix: &'static str,
    pub poll_failure: PollFailurePolicy,
}

pub static FLIGHT_SEARCH: SearchDomain = SearchDomain {
    kind: "flight-searches",
    id_prefix: "flight_search_",
    poll_failure: PollFailurePolicy::EmptyResults,
};

pub static TRAIN_SEARCH: SearchDomain = SearchDomain {
    kind: "train-searches",
    id_prefix: "train_search_",
    poll_failure: PollFailurePolicy::RelayUpstream,
};

/// Extract the search id from the `Location` header of a creation response.
///
/// Two shapes are accepted:
/// - `.../{kind}/{id}/offers`
/// - `.../{kind}/{id}`
///
/// The candidate id must carry the domain's prefix; anything else fails
/// closed with the original string preserved for diagnostics.
pub fn extract_search_id(domain: &SearchDomain, location: &str) -> Result<String, ProxyError> {
    if location.is_empty() {
        return Err(ProxyError::Extraction(location.to_string()));
    }

    let parts: Vec<&str> = location.trim_matches('/').split('/').collect();
    let n = parts.len();

    let candidate = if n >= 3 && parts[n - 1] == "offers" && parts[n - 3] == domain.kind {
        parts[n - 2]
    } else if n >= 2 && parts[n - 2] == domain.kind {
        parts[n - 1]
    } else {
        return Err(ProxyError::Extraction(location.to_string()));
    };

    if candidate.starts_with(domain.id_prefix) {
        Ok(candidate.to_string())
    } else {
        Err(ProxyError::Extraction(location.to_string()))
    }
}
