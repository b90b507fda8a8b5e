//! Semantic scorer over HTTP, and the resolver's fallback around it.

use std::time::{Duration, Instant};

use httpmock::prelude::*;
use serde_json::json;

use calcfind::catalog::CatalogIndex;
use calcfind::resolve::{Query, Scorer, SemanticScorer};
use calcfind::test_utils::sample_catalog;
use calcfind::{Config, Resolver, ResolverConfig, SemanticConfig, Strategy};

fn sample() -> CatalogIndex {
    CatalogIndex::build(sample_catalog()).unwrap()
}

fn semantic_config(endpoint: String, timeout: Duration) -> SemanticConfig {
    SemanticConfig {
        enabled: true,
        endpoint,
        timeout,
        max_retries: 1,
        api_key_env: None,
    }
}

fn resolver_for(server: &MockServer, timeout: Duration) -> Resolver {
    let config = Config {
        semantic: semantic_config(server.url("/resolve"), timeout),
        ..Config::default()
    };
    let resolver = Resolver::from_config(&config).unwrap();
    assert!(resolver.has_semantic());
    resolver
}

fn mock_json(server: &MockServer, body: &serde_json::Value) {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(POST).path("/resolve");
        then.status(200)
            .header("content-type", "application/json")
            .body(body.as_str());
    });
}

#[test]
fn scorer_reads_ranked_answer() {
    let server = MockServer::start();
    mock_json(
        &server,
        &json!({
            "identifier": "calorie-calculator",
            "confidence": 0.91,
            "alternates": [{ "identifier": "bmi-calculator", "score": 0.4 }]
        }),
    );

    let scorer =
        SemanticScorer::from_config(&semantic_config(server.url("/resolve"), Duration::from_secs(2)))
            .unwrap();
    let query = Query::parse("how much should I eat a day", 512);
    let result = scorer
        .score(&query, &sample(), &ResolverConfig::default())
        .unwrap();

    assert_eq!(result.identifier.as_deref(), Some("calorie-calculator"));
    assert!((result.confidence - 0.91).abs() < 1e-9);
    assert_eq!(result.alternates[0].identifier, "bmi-calculator");
    assert_eq!(result.strategy, Strategy::Semantic);
}

#[test]
fn resolver_accepts_known_identifier() {
    let server = MockServer::start();
    mock_json(
        &server,
        &json!({ "identifier": "calorie-calculator", "confidence": 0.8, "alternates": [] }),
    );

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("how much should I eat", &sample());
    assert_eq!(result.identifier.as_deref(), Some("calorie-calculator"));
    assert_eq!(result.strategy, Strategy::Semantic);
}

#[test]
fn resolver_drops_chosen_id_from_alternates() {
    let server = MockServer::start();
    mock_json(
        &server,
        &json!({
            "identifier": "tip-calculator",
            "confidence": 0.7,
            "alternates": [
                { "identifier": "tip-calculator", "score": 0.7 },
                { "identifier": "mortgage-calculator", "score": 0.2 }
            ]
        }),
    );

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("split the bill", &sample());
    assert_eq!(result.identifier.as_deref(), Some("tip-calculator"));
    let ids: Vec<&str> = result.alternates.iter().map(|a| a.identifier.as_str()).collect();
    assert_eq!(ids, vec!["mortgage-calculator"]);
}

#[test]
fn unknown_identifier_falls_back_to_lexical() {
    let server = MockServer::start();
    mock_json(
        &server,
        &json!({ "identifier": "spaceship-calculator", "confidence": 0.99 }),
    );

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("mortgage", &sample());
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
    assert_eq!(result.strategy, Strategy::Lexical);
}

#[test]
fn unknown_alternate_falls_back_to_lexical() {
    let server = MockServer::start();
    mock_json(
        &server,
        &json!({
            "identifier": "tip-calculator",
            "confidence": 0.6,
            "alternates": [{ "identifier": "not-in-catalog", "score": 0.1 }]
        }),
    );

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("mortgage", &sample());
    assert_eq!(result.strategy, Strategy::Lexical);
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
}

#[test]
fn null_identifier_falls_back_to_lexical() {
    let server = MockServer::start();
    mock_json(&server, &json!({ "identifier": null, "confidence": 0.0 }));

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("mortgage", &sample());
    assert_eq!(result.strategy, Strategy::Lexical);
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
}

#[test]
fn malformed_body_falls_back_to_lexical() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/resolve");
        then.status(200)
            .header("content-type", "application/json")
            .body("{ not json");
    });

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("mortgage", &sample());
    assert_eq!(result.strategy, Strategy::Lexical);
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
    // A bad body is not a transport failure; no retry.
    mock.assert_hits(1);
}

#[test]
fn server_error_falls_back_to_lexical() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/resolve");
        then.status(503).body("unavailable");
    });

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("gratuity", &sample());
    assert_eq!(result.strategy, Strategy::Lexical);
    assert_eq!(result.identifier.as_deref(), Some("tip-calculator"));
    // First attempt plus exactly one retry.
    mock.assert_hits(2);
}

#[test]
fn retries_stay_at_one_when_more_are_configured() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/resolve");
        then.status(500).body("boom");
    });

    let config = Config {
        semantic: SemanticConfig {
            max_retries: 5,
            ..semantic_config(server.url("/resolve"), Duration::from_secs(2))
        },
        ..Config::default()
    };
    let result = Resolver::from_config(&config).unwrap().resolve("mortgage", &sample());
    assert_eq!(result.strategy, Strategy::Lexical);
    mock.assert_hits(2);
}

#[test]
fn successful_answer_is_requested_once() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/resolve");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({ "identifier": "tip-calculator", "confidence": 0.8 }).to_string());
    });

    let result = resolver_for(&server, Duration::from_secs(2)).resolve("split the bill", &sample());
    assert_eq!(result.strategy, Strategy::Semantic);
    mock.assert_hits(1);
}

#[test]
fn slow_service_times_out_and_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/resolve");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({ "identifier": "tip-calculator", "confidence": 0.9 }).to_string())
            .delay(Duration::from_secs(3));
    });

    let start = Instant::now();
    let result = resolver_for(&server, Duration::from_millis(200)).resolve("mortgage", &sample());
    let elapsed = start.elapsed();

    assert_eq!(result.strategy, Strategy::Lexical);
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
    // One attempt plus one retry, each bounded by the timeout.
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[test]
fn unreachable_endpoint_falls_back_to_lexical() {
    let config = Config {
        semantic: semantic_config(
            "http://127.0.0.1:9/resolve".to_string(),
            Duration::from_millis(300),
        ),
        ..Config::default()
    };
    let resolver = Resolver::from_config(&config).unwrap();
    let result = resolver.resolve("mortgage", &sample());
    assert_eq!(result.strategy, Strategy::Lexical);
    assert_eq!(result.identifier.as_deref(), Some("mortgage-calculator"));
}

#[test]
fn disabled_semantic_config_builds_lexical_resolver() {
    let resolver = Resolver::from_config(&Config::default()).unwrap();
    assert!(!resolver.has_semantic());
}

#[test]
fn debug_output_shows_endpoint() {
    let scorer = SemanticScorer::from_config(&semantic_config(
        "http://localhost:9/resolve".to_string(),
        Duration::from_secs(1),
    ))
    .unwrap();
    let debug = format!("{scorer:?}");
    assert!(debug.contains("localhost:9"));
    assert!(debug.contains("api_key: None"));
}
