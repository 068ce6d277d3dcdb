//! Tests for `secret-sync classify` and `secret-sync policy`.

use crate::support::*;

#[test]
fn test_classify_builtin_names() {
    let t = Test::new();

    let output = t.classify(&["KUBE_CONFIG", "REGISTRY_PASSWORD", "BRAND_NEW"]);
    assert_success(&output);
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("KUBE_CONFIG"));
    assert!(lines[0].contains("provisioning-only  (listed)"));
    assert!(lines[1].contains("syncable  (listed)"));
    assert!(lines[2].contains("provisioning-only  (unlisted, default)"));
}

#[test]
fn test_classify_unknown_allowed_by_config() {
    let t = Test::new();
    t.write_config("[policy]\nunknown = \"allow\"\n");

    let output = t.classify(&["BRAND_NEW"]);
    assert_success(&output);
    assert_stdout_contains(&output, "syncable  (unlisted, default)");
}

#[test]
fn test_config_cannot_downgrade_builtin() {
    let t = Test::new();
    t.write_config("[policy]\nsyncable = [\"SSH_PRIVATE_KEY\"]\n");

    let output = t.classify(&["SSH_PRIVATE_KEY"]);
    assert_success(&output);
    assert_stdout_contains(&output, "provisioning-only");
}

#[test]
fn test_policy_lists_table() {
    let t = Test::new();

    let output = t.run(&["policy"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Provisioning-only (never synced)");
    assert_stdout_contains(&output, "• KUBE_CONFIG");
    assert_stdout_contains(&output, "• REGISTRY_PASSWORD");
    assert_stdout_contains(&output, "deny (treated as provisioning-only)");
}

#[test]
fn test_policy_json_includes_config_additions() {
    let t = Test::new();
    t.write_config("[policy]\nprovisioning_only = [\"VAULT_ROOT_TOKEN\"]\nsyncable = [\"STRIPE_API_KEY\"]\n");

    let output = t.run(&["policy", "--json"]);
    assert_success(&output);

    let table: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(table["unknown"], "deny");
    let provisioning = table["provisioning_only"].as_array().unwrap();
    assert!(provisioning.iter().any(|n| n == "VAULT_ROOT_TOKEN"));
    assert!(provisioning.iter().any(|n| n == "KUBE_CONFIG"));
    let syncable = table["syncable"].as_array().unwrap();
    assert!(syncable.iter().any(|n| n == "STRIPE_API_KEY"));
}

#[test]
fn test_invalid_policy_name_in_config() {
    let t = Test::new();
    t.write_config("[policy]\nsyncable = [\"not valid\"]\n");

    let output = t.run(&["policy"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "policy.syncable");
}
