mod common;

use std::fs;
use std::time::Duration;

use common::UserdexTest;

#[test]
fn test_config_show_defaults() {
    let t = UserdexTest::new();
    let stdout = t.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["page_size"], "12");
    assert_eq!(json["search_pool_size"], "5000");
    assert_eq!(json["search_debounce_ms"], "300");
    // USERDEX_API_URL overrides the configured URL
    assert_eq!(json["api_url"], "http://127.0.0.1:9/api");
}

#[test]
fn test_config_set_persists() {
    let t = UserdexTest::new();
    t.run_success(&["config", "set", "page_size", "20"]);
    t.run_success(&["config", "set", "nationalities", "gb,us"]);

    let content = fs::read_to_string(t.config_file()).unwrap();
    assert!(content.contains("page_size: 20"));

    let value = t.run_success(&["config", "get", "page_size"]);
    assert_eq!(value.trim(), "20");
    let value = t.run_success(&["config", "get", "nationalities"]);
    assert_eq!(value.trim(), "GB,US");
}

#[test]
fn test_config_set_rejects_bad_values() {
    let t = UserdexTest::new();
    let stderr = t.run_failure(&["config", "set", "page_size", "0"]);
    assert!(stderr.contains("page_size"));

    let stderr = t.run_failure(&["config", "set", "colour", "blue"]);
    assert!(stderr.contains("unknown config key"));

    let stderr = t.run_failure(&["config", "set", "nationalities", "GB,XX"]);
    assert!(stderr.contains("invalid nationality"));

    assert!(!t.config_file().exists());
}

#[test]
fn test_state_show_defaults() {
    let t = UserdexTest::new();
    let stdout = t.run_success(&["state", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["user_listing_filter_page"], 1);
    assert_eq!(json["user_listing_filter_gender"], "");
}

#[test]
fn test_state_reset_forgets_filters() {
    let t = UserdexTest::new();
    fs::write(
        t.state_file(),
        r#"{"user_listing_filter_gender": "\"male\"", "user_listing_filter_page": "4"}"#,
    )
    .unwrap();

    let stdout = t.run_success(&["state", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["user_listing_filter_page"], 4);
    assert_eq!(json["user_listing_filter_gender"], "male");

    t.run_success(&["state", "reset"]);

    let stdout = t.run_success(&["state", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["user_listing_filter_page"], 1);
    assert_eq!(json["user_listing_filter_gender"], "");
}

#[test]
fn test_ls_failure_is_reported_and_filters_persist() {
    let t = UserdexTest::new();
    t.run_success(&["config", "set", "remote_timeout", "2"]);

    let stderr = t.run_failure(&["ls", "--gender", "female", "--page", "3"]);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("failed to fetch users"));

    let stdout = t.run_success(&["state", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["user_listing_filter_gender"], "female");
    assert_eq!(json["user_listing_filter_page"], 3);
}

#[test]
fn test_ls_rejects_page_zero() {
    let t = UserdexTest::new();
    t.run_failure(&["ls", "--page", "0"]);
    assert!(!t.state_file().exists());
}

#[test]
fn test_browse_applies_only_the_last_quick_search() {
    let t = UserdexTest::new();
    let quick = Duration::from_millis(20);
    let output = t.run_browse(&[
        ("/a", quick),
        ("/ann", Duration::from_millis(1200)),
        ("quit", quick),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Search \"ann\"").count(), 1, "{stdout}");
    assert!(!stdout.contains("Search \"a\""), "{stdout}");
    // the unreachable API leaves a retryable error on screen
    assert!(stdout.contains("Type 'retry' to try again."), "{stdout}");
}

#[test]
fn test_browse_gender_change_keeps_typed_search() {
    let t = UserdexTest::new();
    let quick = Duration::from_millis(20);
    let output = t.run_browse(&[
        ("/ann", quick),
        ("gender female", Duration::from_millis(1200)),
        ("quit", quick),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Search \"ann\", gender: female"), "{stdout}");

    let state = fs::read_to_string(t.state_file()).unwrap();
    assert!(state.contains("female"));
}
