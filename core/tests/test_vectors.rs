//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed values (not raw strings) avoids
//! false negatives from field-ordering differences.

use pokedex_core::{ApiError, HttpMethod, HttpResponse, PokedexClient, PokemonDetail, PokemonSummary};

const BASE_URL: &str = "https://pokeapi.co/api/v2";

fn client() -> PokedexClient {
    PokedexClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_error_kind(name: &str, expected: &str, err: &ApiError) {
    let matched = match expected {
        "NotFound" => matches!(err, ApiError::NotFound),
        "Http" => matches!(err, ApiError::Http { .. }),
        "Decode" => matches!(err, ApiError::Decode(_)),
        "UnexpectedShape" => matches!(err, ApiError::UnexpectedShape(_)),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let limit = case["input_limit"].as_u64().unwrap() as u32;
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list_pokemon(limit);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_list_pokemon(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, expected_error.as_str().unwrap(), &result.unwrap_err());
        } else {
            let summaries = result.unwrap();
            let expected: Vec<PokemonSummary> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(summaries, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_get_pokemon(id).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_get_pokemon(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, expected_error.as_str().unwrap(), &result.unwrap_err());
        } else {
            let detail = result.unwrap();
            let expected: PokemonDetail = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(detail, expected, "{name}: parsed result");
            assert_eq!(detail.extra["base_experience"], 112, "{name}: extra fields kept");
        }
    }
}
