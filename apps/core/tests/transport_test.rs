use glint_core::transport::handle_json;
use glint_core::usage_store::UsageStore;

#[test]
fn classify_request_round_trips_as_json() {
    let store = UsageStore::open_memory().unwrap();
    let response = handle_json(
        &store,
        r#"{"kind":"Classify","payload":{"query":"2+2"}}"#,
    );

    let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert_eq!(
        parsed["response"]["payload"]["action"]["payload"],
        "4"
    );
}

#[test]
fn classify_of_plain_query_returns_no_action() {
    let store = UsageStore::open_memory().unwrap();
    let response = handle_json(
        &store,
        r#"{"kind":"Classify","payload":{"query":"visual studio"}}"#,
    );

    let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert!(parsed["response"]["payload"]["action"].is_null());
}

#[test]
fn launch_of_missing_path_maps_to_error_response() {
    let store = UsageStore::open_memory().unwrap();
    let response = handle_json(
        &store,
        r#"{"kind":"Launch","payload":{"path":"/definitely/not/here.exe","name":null}}"#,
    );

    let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["status"], "err");
    assert_eq!(parsed["error"]["code"], "launch");
}

#[cfg(not(target_os = "windows"))]
#[test]
fn successful_launch_records_usage() {
    let path = std::env::temp_dir().join(format!(
        "glint-transporttest-{}.tmp",
        std::process::id()
    ));
    std::fs::write(&path, b"ok").unwrap();

    let store = UsageStore::open_memory().unwrap();
    let request = serde_json::json!({
        "kind": "Launch",
        "payload": { "path": path.to_string_lossy(), "name": "Temp Target" }
    });
    let response = handle_json(&store, &request.to_string());

    let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["response"]["payload"]["launched"], true);
    assert_eq!(store.lookup("Temp Target").unwrap().unwrap().use_count, 1);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn suggest_request_returns_rule_table_entries() {
    let store = UsageStore::open_memory().unwrap();
    let response = handle_json(
        &store,
        r#"{"kind":"Suggest","payload":{"query":"","hour":10}}"#,
    );

    let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["status"], "ok");
    let suggestions = parsed["response"]["payload"]["suggestions"]
        .as_array()
        .unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions
        .iter()
        .all(|s| s["source"] == "work_hours"));
}

#[test]
fn invalid_json_yields_typed_error() {
    let store = UsageStore::open_memory().unwrap();
    let response = handle_json(&store, "{not json");
    let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["status"], "err");
    assert_eq!(parsed["error"]["code"], "invalid_json");
}
