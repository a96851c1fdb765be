use waypoint::error::ProxyError;
use waypoint::extract::{FLIGHT_SEARCH, TRAIN_SEARCH, extract_search_id};

#[test]
fn test_extracts_id_from_offers_shape() {
    let loc = "https://content-api.sandbox.junction.dev/flight-searches/flight_search_ABC/offers";
    let id = extract_search_id(&FLIGHT_SEARCH, loc).unwrap();
    assert_eq!(id, "flight_search_ABC");
}

#[test]
fn test_extracts_id_from_direct_shape() {
    let id = extract_search_id(&FLIGHT_SEARCH, "/flight-searches/flight_search_ABC").unwrap();
    assert_eq!(id, "flight_search_ABC");
}

#[test]
fn test_tolerates_surrounding_slashes() {
    let id = extract_search_id(&FLIGHT_SEARCH, "/flight-searches/flight_search_ABC/").unwrap();
    assert_eq!(id, "flight_search_ABC");
}

#[test]
fn test_train_domain_offers_shape() {
    let id =
        extract_search_id(&TRAIN_SEARCH, "/train-searches/train_search_42/offers").unwrap();
    assert_eq!(id, "train_search_42");
}

#[test]
fn test_train_domain_direct_shape() {
    let id = extract_search_id(&TRAIN_SEARCH, "/train-searches/train_search_42").unwrap();
    assert_eq!(id, "train_search_42");
}

#[test]
fn test_rejects_wrong_resource_kind() {
    let loc = "/train-searches/flight_search_ABC/offers";
    let err = extract_search_id(&FLIGHT_SEARCH, loc).unwrap_err();
    match err {
        ProxyError::Extraction(original) => assert_eq!(original, loc),
        other => panic!("expected extraction error, got {other:?}"),
    }
}

#[test]
fn test_rejects_wrong_id_prefix() {
    let loc = "/flight-searches/search_ABC/offers";
    assert!(matches!(
        extract_search_id(&FLIGHT_SEARCH, loc),
        Err(ProxyError::Extraction(_))
    ));
}

#[test]
fn test_rejects_too_few_segments() {
    assert!(extract_search_id(&FLIGHT_SEARCH, "flight_search_ABC").is_err());
    assert!(extract_search_id(&FLIGHT_SEARCH, "/offers").is_err());
}

#[test]
fn test_rejects_empty_location() {
    assert!(matches!(
        extract_search_id(&TRAIN_SEARCH, ""),
        Err(ProxyError::Extraction(_))
    ));
}

#[test]
fn test_never_guesses_on_ambiguous_paths() {
    // Kind token in the wrong position must not match either shape.
    assert!(extract_search_id(&FLIGHT_SEARCH, "/flight-searches/foo/bar").is_err());
    assert!(extract_search_id(&FLIGHT_SEARCH, "/flight-searches/offers").is_err());
}
