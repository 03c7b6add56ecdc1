// Host-side tests for the text-to-parameters request/response contract and
// the generation controller.

use nebula_core::*;
use serde_json::json;

fn envelope(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

fn fire() -> serde_json::Value {
    json!({
        "count": 12000,
        "size": 1.1,
        "speed": 3.5,
        "noiseStrength": 2.5,
        "colorStart": "#ff4500",
        "colorEnd": "#ffd700",
        "dispersion": 7.0,
        "shapeBias": 0.6
    })
}

#[test]
fn request_body_carries_schema_and_prompt() {
    let body = request_body("a calm ocean");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "a calm ocean");
    let cfg = &body["generationConfig"];
    assert_eq!(cfg["responseMimeType"], "application/json");
    let required: Vec<&str> = cfg["responseSchema"]["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(required.len(), 8);
    for name in Field::ALL.map(Field::name) {
        assert!(required.contains(&name), "{name} not required");
    }
    assert!(required.contains(&"colorStart") && required.contains(&"colorEnd"));
    assert_eq!(cfg["responseSchema"]["properties"]["count"]["type"], "INTEGER");
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("shapeBias"));
}

#[test]
fn parses_a_valid_response() {
    let params = parse_response(&envelope(&fire().to_string())).unwrap();
    assert_eq!(params.count, 12000);
    assert_eq!(params.color_start, HexColor::new(0xff, 0x45, 0x00));
    assert!((params.shape_bias - 0.6).abs() < 1e-6);
}

#[test]
fn rejects_bad_payloads() {
    let mut missing = fire();
    missing.as_object_mut().unwrap().remove("dispersion");
    let mut out_of_range = fire();
    out_of_range["speed"] = json!(9.0);
    let mut bad_color = fire();
    bad_color["colorEnd"] = json!("gold");
    let mut wrong_type = fire();
    wrong_type["count"] = json!("lots");

    assert!(matches!(
        parse_response(&envelope(&missing.to_string())),
        Err(GenerateError::Malformed(_))
    ));
    assert!(matches!(
        parse_response(&envelope(&out_of_range.to_string())),
        Err(GenerateError::Invalid(ParamError::OutOfRange { field: "speed", .. }))
    ));
    assert!(parse_response(&envelope(&bad_color.to_string())).is_err());
    assert!(parse_response(&envelope(&wrong_type.to_string())).is_err());
    assert!(parse_response(&envelope("not json")).is_err());
    assert!(matches!(
        parse_response(r#"{"candidates":[]}"#),
        Err(GenerateError::EmptyResponse)
    ));
    assert!(matches!(
        parse_response(&envelope("   ")),
        Err(GenerateError::EmptyResponse)
    ));
    assert!(parse_response("<html>").is_err());
}

#[test]
fn scenario_missing_field_leaves_store_unchanged() {
    let mut store = ParameterStore::default();
    store.set_field(Field::Speed, 4.0).unwrap();
    let before = store.current().clone();
    let revision = store.revision();

    let mut ctl = GenerationController::new(GeneratorConfig::default());
    ctl.begin("fire", Some("key"), 0.0).unwrap();
    let mut missing = fire();
    missing.as_object_mut().unwrap().remove("colorEnd");
    let result = parse_response(&envelope(&missing.to_string()));
    assert!(ctl.finish(result, &mut store, 100.0).is_err());

    assert_eq!(store.current(), &before);
    assert_eq!(store.revision(), revision);
    assert_eq!(ctl.state(), GenerationState::Error { since_ms: 100.0 });
}

#[test]
fn success_replaces_the_store() {
    let mut store = ParameterStore::default();
    let mut ctl = GenerationController::new(GeneratorConfig::default());
    let req = ctl.begin("  fire  ", Some("key"), 0.0).unwrap();
    assert!(ctl.is_busy());
    assert_eq!(req.api_key, "key");
    assert!(req.url.ends_with("/models/gemini-2.5-flash:generateContent"));
    assert!(req.body.contains("\"fire\""));

    let result = parse_response(&envelope(&fire().to_string()));
    ctl.finish(result, &mut store, 10.0).unwrap();
    assert_eq!(ctl.state(), GenerationState::Idle);
    assert_eq!(store.current().count, 12000);
    assert_eq!(store.revision(), 1);
}

#[test]
fn one_request_at_a_time() {
    let mut ctl = GenerationController::new(GeneratorConfig::default());
    ctl.begin("a", Some("key"), 0.0).unwrap();
    assert!(matches!(ctl.begin("b", Some("key"), 1.0), Err(GenerateError::Busy)));
    assert!(ctl.is_busy());
}

#[test]
fn empty_prompt_is_ignored() {
    let mut ctl = GenerationController::new(GeneratorConfig::default());
    assert!(matches!(ctl.begin("   ", Some("key"), 0.0), Err(GenerateError::EmptyPrompt)));
    assert_eq!(ctl.state(), GenerationState::Idle);
}

#[test]
fn missing_key_fails_before_any_request() {
    let mut ctl = GenerationController::new(GeneratorConfig::default());
    for key in [None, Some(""), Some("  ")] {
        assert!(matches!(ctl.begin("fire", key, 5.0), Err(GenerateError::MissingApiKey)));
        assert_eq!(ctl.state(), GenerationState::Error { since_ms: 5.0 });
    }
}

#[test]
fn error_recovers_after_delay() {
    let mut store = ParameterStore::default();
    let mut ctl = GenerationController::new(GeneratorConfig::default());
    assert_eq!(ctl.recovery_ms(), 3000);
    ctl.begin("fire", Some("key"), 0.0).unwrap();
    let _ = ctl.finish(Err(GenerateError::Transport("offline".into())), &mut store, 1000.0);

    assert!(!ctl.poll(1000.0));
    assert!(!ctl.poll(3999.0));
    assert!(matches!(ctl.state(), GenerationState::Error { .. }));
    assert!(ctl.poll(4000.0));
    assert_eq!(ctl.state(), GenerationState::Idle);
    assert!(!ctl.poll(9000.0));

    // a new request is accepted again
    assert!(ctl.begin("ice", Some("key"), 9000.0).is_ok());
}

#[test]
fn endpoint_and_model_are_configurable() {
    let cfg = GeneratorConfig {
        endpoint: "http://localhost:8080/v1/".into(),
        model: "test-model".into(),
        recovery_ms: 10,
    };
    assert_eq!(cfg.url(), "http://localhost:8080/v1/models/test-model:generateContent");
}
