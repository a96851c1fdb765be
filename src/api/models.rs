use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub iata: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StationQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Value,
}

impl ItemsResponse {
    pub fn new(items: Value) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self { items: Value::Array(vec![]) }
    }
}
