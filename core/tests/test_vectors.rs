//! Verify dispatch against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names a catalog endpoint and its arguments, describes the
//! request that must be built, a simulated response, and the expected result
//! or error. Bodies are compared as parsed JSON, not raw strings.

use baruwa_core::endpoints::ALL;
use baruwa_core::{ApiError, ClientConfig, Dispatcher, Endpoint, HttpMethod, HttpResponse};
use serde_json::Value;

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn endpoint(name: &str) -> Endpoint {
    ALL.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, e)| *e)
        .unwrap_or_else(|| panic!("unknown endpoint: {name}"))
}

fn check_error(name: &str, err: &ApiError, expected: &Value) {
    let kind_matches = match expected["kind"].as_str().unwrap() {
        "api" => matches!(err, ApiError::Api { .. }),
        "malformed" => matches!(err, ApiError::MalformedRequest(_)),
        other => panic!("{name}: unknown error kind {other}"),
    };
    assert!(kind_matches, "{name}: wrong error {err:?}");
    assert_eq!(
        u64::from(err.code()),
        expected["code"].as_u64().unwrap(),
        "{name}: code"
    );
    if let Some(message) = expected["message"].as_str() {
        assert_eq!(err.message(), message, "{name}: message");
    }
}

#[test]
fn dispatch_test_vectors() {
    let raw = include_str!("../../test-vectors/dispatch.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let base_url = vectors["base_url"].as_str().unwrap();
    let dispatcher = Dispatcher::new(ClientConfig::new(
        base_url,
        vectors["token"].as_str().unwrap(),
    ));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let args: Vec<&str> = case["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap())
            .collect();
        let body = case.get("body");

        let target = endpoint(case["endpoint"].as_str().unwrap());
        let built = dispatcher.build_request(target, &args, body);

        let Some(expected_req) = case.get("expected_request") else {
            let err = built.expect_err(name);
            check_error(name, &err, &case["expected_error"]);
            continue;
        };

        // Verify build
        let req = built.unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.path,
            format!("{base_url}{}", expected_req["path"].as_str().unwrap()),
            "{name}: path"
        );
        if let Some(headers) = expected_req.get("headers").and_then(Value::as_object) {
            for (header, value) in headers {
                assert_eq!(req.header(header), value.as_str(), "{name}: header {header}");
            }
        }
        match expected_req.get("body") {
            Some(expected_body) => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, expected_body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: unexpected body"),
        }

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        match case.get("expected_result") {
            Some(expected) => {
                let value = dispatcher
                    .parse_response(response)
                    .unwrap_or_else(|e| panic!("{name}: {e}"));
                assert_eq!(&value, expected, "{name}: parsed result");
            }
            None => {
                let err = dispatcher.parse_response(response).unwrap_err();
                check_error(name, &err, &case["expected_error"]);
            }
        }
    }
}
