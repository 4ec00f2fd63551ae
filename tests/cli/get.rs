//! Tests for the get command.

use crate::support::*;

#[test]
fn test_get_prints_only_password() {
    let t = Test::with_generic(&[("svc", "s3cret")]);

    let output = t.get("svc");
    assert_success(&output);
    assert_eq!(stdout(&output), "s3cret\n");
    assert_eq!(t.calls(), vec!["find-generic-password -a  -s svc -g"]);
}

#[test]
fn test_get_missing_declined() {
    let t = Test::new();

    let output = t.run(&["get", "svc"], "n\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found");
    assert_stderr_contains(&output, "keysmith config svc");
    assert_eq!(t.calls_to("add-"), 0);
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_get_missing_eof_counts_as_decline() {
    let t = Test::new();

    let output = t.get("svc");
    assert_failure(&output);
    assert_eq!(t.calls_to("add-"), 0);
}

#[test]
fn test_get_missing_accepted_creates_and_returns() {
    let t = Test::new();

    let output = t.run(&["get", "svc"], &yes_then("fresh"));
    assert_success(&output);
    assert_eq!(stdout(&output), "fresh\n");
    assert_eq!(t.stored("generic", "", "svc").as_deref(), Some("fresh"));
    assert_eq!(t.calls_to("find-"), 2);
    assert_eq!(t.calls_to("add-generic-password"), 1);
    assert!(!t.calls().iter().any(|c| c.contains("-U")));
}

#[test]
fn test_get_url_creates_internet_password() {
    let t = Test::new();

    let output = t.run(
        &["get", "https://example.com/api", "-a", "bob"],
        &yes_then("pw"),
    );
    assert_success(&output);
    assert_eq!(stdout(&output), "pw\n");
    assert!(t
        .calls()
        .contains(&"add-internet-password -a bob -s example.com -w pw -p /api -r htps".to_string()));
    assert_eq!(t.stored("internet", "bob", "example.com").as_deref(), Some("pw"));
}

#[test]
fn test_get_json_record() {
    let t = Test::new();
    t.seed("internet", "bob", "example.com", "hunter2");
    std::fs::write(t.store().join("internet/bob@example.com.path"), "/api").unwrap();
    std::fs::write(t.store().join("internet/bob@example.com.ptcl"), "htps").unwrap();

    let output = t.run(&["get", "https://example.com/api", "-a", "bob", "--json"], "");
    assert_success(&output);

    let record: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(record["kind"], "internet");
    assert_eq!(record["name"], "example.com");
    assert_eq!(record["account"], "bob");
    assert_eq!(record["path"], "/api");
    assert_eq!(record["scheme"], "https:");
    assert_eq!(record["password"], "hunter2");
    assert!(record["keychain"]
        .as_str()
        .unwrap()
        .ends_with("login.keychain-db"));
}

#[test]
fn test_get_probe_falls_through_to_internet() {
    let t = Test::new();
    t.seed("internet", "", "example.com", "probed");

    let output = t.run(&["get", "example.com", "--probe"], "");
    assert_success(&output);
    assert_eq!(stdout(&output), "probed\n");

    let calls = t.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("find-generic-password"));
    assert!(calls[1].starts_with("find-internet-password"));
}

#[test]
fn test_get_explicit_kind() {
    let t = Test::new();
    t.seed("internet", "", "example.com", "direct");

    let output = t.run(&["get", "example.com", "--kind", "internet"], "");
    assert_success(&output);
    assert_eq!(stdout(&output), "direct\n");
    assert_eq!(t.calls().len(), 1);
}

#[test]
fn test_get_asks_for_missing_service() {
    let t = Test::with_generic(&[("svc", "asked")]);

    let output = t.run(&["get"], "svc\n");
    assert_success(&output);
    assert_eq!(stdout(&output), "asked\n");
    assert_stderr_contains(&output, "service or url:");
}

#[test]
fn test_get_uses_configured_account() {
    let t = Test::new();
    t.seed("generic", "alice", "svc", "hers");
    t.write_config("account = \"alice\"\n");

    let output = t.get("svc");
    assert_success(&output);
    assert_eq!(stdout(&output), "hers\n");
}

#[test]
fn test_get_configured_probe() {
    let t = Test::new();
    t.seed("internet", "", "example.com", "probed");
    t.write_config("probe = true\n");

    let output = t.get("example.com");
    assert_success(&output);
    assert_eq!(t.calls().len(), 2);
}
