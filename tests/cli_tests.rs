use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn receiving_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("receiving"))
}

fn init_config(config_path: &Path) {
    receiving_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

fn sample_order(config_path: &Path) -> String {
    config_path
        .join("sample-order.toml")
        .to_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_help() {
    receiving_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CLI for purchase-order receiving checklists",
        ));
}

#[test]
fn test_version() {
    receiving_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("receiving"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");

    receiving_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized receiving config"));

    // Check files were created
    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("sample-order.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");

    // First init should succeed
    init_config(&config_path);

    // Second init should fail
    receiving_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "status",
            "--order",
            "missing-order.toml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_merchants_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args(["merchants", "--order", &sample_order(&config_path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme-foods"))
        .stdout(predicate::str::contains("Acme Foods"))
        .stdout(predicate::str::contains("blue-harvest"))
        .stdout(predicate::str::contains("AWAITING"));
}

#[test]
fn test_items_list_with_totals_footer() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args(["items", "--order", &sample_order(&config_path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basmati Rice"))
        .stdout(predicate::str::contains("Uncategorized"))
        .stdout(predicate::str::contains("TOTALS"))
        .stdout(predicate::str::contains("item(s) awaiting receipt"));
}

#[test]
fn test_items_unknown_merchant() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args([
            "items",
            "--order",
            &sample_order(&config_path),
            "--merchant",
            "nonexistent",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Merchant 'nonexistent' not found",
        ));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "status",
            "--order",
            &sample_order(&config_path),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Receiving Status"))
        .stdout(predicate::str::contains("PO-2026-0001"))
        .stdout(predicate::str::contains("Awaiting receipt:"));
}

#[test]
fn test_report_requires_scope() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "--order",
            &sample_order(&config_path),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify a report scope"));
}

#[test]
fn test_report_unknown_merchant() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "--order",
            &sample_order(&config_path),
            "--merchant",
            "nonexistent",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Merchant 'nonexistent' not found",
        ));
}

#[test]
fn test_report_unsupported_language() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "--order",
            &sample_order(&config_path),
            "--merchant",
            "acme-foods",
            "--lang",
            "fr",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported report language 'fr'"));
}

fn write_fully_received_order(config_path: &Path) -> String {
    let order_path = config_path.join("received-order.toml");
    fs::write(
        &order_path,
        r#"[order]
number = "PO-2026-0009"
created = "2026-07-01"
currency = "USD"
total = 100.0

[[merchant]]
id = "acme"
name = "Acme Foods"

[[merchant.item]]
name = "Rice"
unit = "kg"
ordered = 10

[[merchant.item.receipt]]
good = 10
"#,
    )
    .unwrap();
    order_path.to_str().unwrap().to_string()
}

#[test]
fn test_report_nothing_to_receive_for_merchant() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);
    let order_path = write_fully_received_order(&config_path);

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "--order",
            &order_path,
            "--merchant",
            "acme",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Nothing awaiting receipt for merchant 'Acme Foods'",
        ));
}

#[test]
fn test_report_nothing_to_receive_for_order() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);
    let order_path = write_fully_received_order(&config_path);

    receiving_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "report",
            "--order",
            &order_path,
            "--all",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Nothing awaiting receipt for order PO-2026-0009",
        ));
}

#[test]
fn test_malformed_order_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("receiving-config");
    init_config(&config_path);

    let order_path = config_path.join("broken-order.toml");
    fs::write(&order_path, "[order\nnumber = ").unwrap();

    receiving_cmd()
        .args(["merchants", "--order", order_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse order file"));
}

#[test]
fn test_missing_order_file() {
    receiving_cmd()
        .args(["merchants", "--order", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Order file not found"));
}
