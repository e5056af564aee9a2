use costar_core::errors::*;
use costar_core::ActorSide;

#[test]
fn unresolved_actor_names_side_and_name() {
    let err = SearchError::UnresolvedActor {
        side: ActorSide::Target,
        name: "Nobody Atall".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("target"));
    assert!(msg.contains("Nobody Atall"));
    assert_eq!(err.error_code(), "UNRESOLVED_ACTOR");
}

#[test]
fn catalog_error_converts_to_costar_error() {
    let err: CostarError = CatalogError::HttpStatus {
        url: "https://example.test/name/nm1/".into(),
        status: 503,
    }
    .into();
    assert!(matches!(err, CostarError::Catalog(_)));
    assert_eq!(err.error_code(), "CATALOG_HTTP_STATUS");
    assert!(err.coded_string().starts_with("[CATALOG_HTTP_STATUS]"));
}

#[test]
fn transient_catalog_errors() {
    let url = "u".to_string();
    assert!(CatalogError::Network { url: url.clone(), reason: "reset".into() }.is_transient());
    assert!(CatalogError::HttpStatus { url: url.clone(), status: 502 }.is_transient());
    assert!(CatalogError::HttpStatus { url: url.clone(), status: 429 }.is_transient());
    assert!(!CatalogError::HttpStatus { url: url.clone(), status: 404 }.is_transient());
    assert!(!CatalogError::Parse { url, what: "cast".into() }.is_transient());
}

#[test]
fn config_error_converts_to_costar_error() {
    let err: CostarError = ConfigError::ValidationFailed {
        field: "search.max_depth".into(),
        message: "must be between 1 and 12".into(),
    }
    .into();
    assert!(matches!(err, CostarError::Config(_)));
    assert!(err.to_string().contains("search.max_depth"));
}

#[test]
fn search_error_serializes_with_kind_tag() {
    let err = SearchError::TimedOut {
        depth: 3,
        elapsed_ms: 1500,
    };
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "timed_out");
    assert_eq!(json["depth"], 3);
}
