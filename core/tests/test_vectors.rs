//! Verify builders, normalization and error classification against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Each vector file lists `cases`. Comparing parsed JSON (not raw strings)
//! avoids false negatives from field-ordering differences.

use serde_json::Value;
use vpic_core::case::snake_case_results;
use vpic_core::standardize::standardize;
use vpic_core::{ApiError, BatchVin, Error, ErrorKind, HttpMethod, HttpRequest, HttpResponse, VpicClient};

const HOST: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

fn client() -> VpicClient {
    VpicClient::new(HOST).unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "InvalidRequest" => ErrorKind::InvalidRequest,
        "InvalidParameters" => ErrorKind::InvalidParameters,
        "MethodNotFound" => ErrorKind::MethodNotFound,
        "TooManyRequests" => ErrorKind::TooManyRequests,
        "InternalError" => ErrorKind::InternalError,
        "ServiceUnavailable" => ErrorKind::ServiceUnavailable,
        "Other" => ErrorKind::Other,
        other => panic!("unknown error kind: {other}"),
    }
}

/// Dispatch a vector's operation name to the matching builder.
fn build(c: &VpicClient, operation: &str, args: &Value) -> vpic_core::Result<HttpRequest> {
    let text = |key: &str| args[key].as_str().unwrap().to_string();
    match operation {
        "decode_vin" => c.build_decode_vin(
            &text("vin"),
            args["model_year"].as_u64().map(|y| y as u16),
            args["extend"].as_bool().unwrap(),
        ),
        "decode_vin_batch" => {
            let vins: Vec<BatchVin> = args["vins"]
                .as_array()
                .unwrap()
                .iter()
                .map(|entry| {
                    let entry = entry.as_str().unwrap();
                    match entry.split_once(',') {
                        Some((vin, year)) => BatchVin::new(vin).with_model_year(year.parse().unwrap()),
                        None => BatchVin::new(entry),
                    }
                })
                .collect();
            c.build_decode_vin_batch(&vins)
        }
        "decode_wmi" => c.build_decode_wmi(&text("wmi")),
        "makes_for_vehicle_type" => c.build_makes_for_vehicle_type(&text("vehicle_type")),
        "vehicle_variable_list" => c.build_vehicle_variable_list(),
        "vehicle_variable_values_list" => c.build_vehicle_variable_values_list(text("variable")),
        other => panic!("unknown operation: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = build(&c, case["operation"].as_str().unwrap(), &case["args"]);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "InvalidArgument" => {
                    assert!(matches!(err, Error::InvalidArgument(_)), "{name}: expected InvalidArgument")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let req = result.unwrap();
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{HOST}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.body.as_deref(), expected_req["body"].as_str(), "{name}: body");
        assert_eq!(
            req.headers.first(),
            Some(&("Accept-Charset".to_string(), "utf-8".to_string())),
            "{name}: headers"
        );
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

#[test]
fn normalize_test_vectors() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let standardized = standardize(case["input"].clone());
        assert_eq!(standardized, case["standardized"], "{name}: standardized");

        let snake_cased = snake_case_results(standardized);
        assert_eq!(snake_cased, case["snake_cased"], "{name}: snake_cased");
    }
}

#[test]
fn normalization_through_the_client() {
    let raw = include_str!("../../test-vectors/normalize.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: serde_json::json!({"Count": 1, "Results": case["input"]}).to_string(),
        };
        let results = c.parse_results(response).unwrap();
        assert_eq!(results, case["standardized"], "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let headers: Vec<(String, String)> = case["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers,
            body: case["body"].as_str().unwrap().to_string(),
        };

        let err: ApiError = match c.parse_results(response.clone()) {
            Err(Error::Api(err)) => err,
            other => panic!("{name}: expected an API error, got {other:?}"),
        };
        assert_eq!(err.kind, parse_kind(case["expected_kind"].as_str().unwrap()), "{name}: kind");
        assert_eq!(err.message, case["expected_message"].as_str().unwrap(), "{name}: message");
        assert_eq!(err.detail, case["expected_detail"].as_str().unwrap(), "{name}: detail");
        assert_eq!(err.retry_after(), case["retry_after"].as_u64(), "{name}: retry_after");
        assert_eq!(err.response, response, "{name}: response");
    }
}
