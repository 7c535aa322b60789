//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences. `expected_error` holds
//! the HTTP status the parse must reject with.

use std::sync::Arc;

use portal_core::model::{Exam, ExamPatch, NewExam};
use portal_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, ResourceClient};

const BASE_URL: &str = "http://localhost:3000/api";
const ENDPOINT: &str = "/exams";

struct NoTransport;

impl portal_core::HttpTransport for NoTransport {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, portal_core::TransportError> {
        panic!("vector tests must not touch the transport");
    }
}

fn client() -> ResourceClient {
    ResourceClient::new(BASE_URL, Arc::new(NoTransport))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request_matches(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (
                    arr[0].as_str().unwrap().to_string(),
                    arr[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    if let Some(expected_body) = expected.get("body") {
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(&body, expected_body, "{name}: body");
    } else {
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_rejected_with(name: &str, err: ApiError, case: &serde_json::Value) {
    let expected_status = case["expected_error"].as_u64().unwrap() as u16;
    match err {
        ApiError::Request { status, .. } => {
            assert_eq!(status, expected_status, "{name}: rejected status")
        }
        other => panic!("{name}: expected request error, got: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: NewExam = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create(ENDPOINT, &input).unwrap();
        assert_request_matches(name, &req, &case["expected_request"]);

        let exam: Exam = c.parse_one(ENDPOINT, simulated_response(case)).unwrap();
        let expected: Exam = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(exam, expected, "{name}: parsed result");
    }
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

        let req = c.build_read_all(ENDPOINT);
        assert_request_matches(name, &req, &case["expected_request"]);

        let exams: Vec<Exam> = c.parse_many(ENDPOINT, simulated_response(case)).unwrap();
        let expected: Vec<Exam> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(exams, expected, "{name}: parsed result");
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

        let req = c.build_read_one(ENDPOINT, id);
        assert_request_matches(name, &req, &case["expected_request"]);

        let result: Result<Exam, _> = c.parse_one(ENDPOINT, simulated_response(case));
        if case.get("expected_error").is_some() {
            assert_rejected_with(name, result.unwrap_err(), case);
        } else {
            let expected: Exam = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: ExamPatch = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update(ENDPOINT, id, &input).unwrap();
        assert_request_matches(name, &req, &case["expected_request"]);

        let result: Result<Exam, _> = c.parse_one(ENDPOINT, simulated_response(case));
        if case.get("expected_error").is_some() {
            assert_rejected_with(name, result.unwrap_err(), case);
        } else {
            let expected: Exam = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_delete(ENDPOINT, id);
        assert_request_matches(name, &req, &case["expected_request"]);

        let result = c.parse_delete(ENDPOINT, simulated_response(case));
        if case.get("expected_error").is_some() {
            assert_rejected_with(name, result.unwrap_err(), case);
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
