use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn debtor_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("debtor"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn init(config_path: &Path) {
    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

fn use_file_source(config_path: &Path) {
    fs::write(
        config_path.join("config.toml"),
        "[source]\nkind = \"files\"\ndata_dir = \"data\"\n",
    )
    .unwrap();
}

#[test]
fn test_help() {
    debtor_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Debtor payment history viewer"));
}

#[test]
fn test_version() {
    debtor_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("debtor"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized debtor history config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("data").join("1.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");

    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_history_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_debtors_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "debtors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("Jane Smith"))
        .stdout(predicate::str::contains("Robert Johnson"))
        .stdout(predicate::str::contains("950.00 USD"))
        .stdout(predicate::str::contains("210.00 USD"))
        .stdout(predicate::str::contains("Total: 3 debtors"));
}

#[test]
fn test_debtors_search() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "debtors", "--search", "jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"))
        .stdout(predicate::str::contains("John Doe").not());

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "debtors", "-s", "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No debtors found."));
}

#[test]
fn test_history_collapsed() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe's Debt History"))
        .stdout(predicate::str::contains("TOTAL DEBT"))
        .stdout(predicate::str::contains("Sale #INV-2023-001 [Outstanding]"))
        .stdout(predicate::str::contains("Sale #INV-2023-002 [Paid]"))
        .stdout(predicate::str::contains("May 15, 2023"))
        .stdout(predicate::str::contains("Reductions: -70.00 USD"))
        .stdout(predicate::str::contains("Remaining:  30.00 USD"))
        .stdout(predicate::str::contains("--expand p1"))
        .stdout(predicate::str::contains("Payment Transactions").not())
        .stdout(predicate::str::contains("Page 1 of 1 | 3 items | 10 items per page"));
}

#[test]
fn test_history_expand_products() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "history",
            "1",
            "--expand",
            "p1:products",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cement"))
        .stdout(predicate::str::contains("10 bags"))
        .stdout(predicate::str::contains("125.00"))
        .stdout(predicate::str::contains("TR-001"))
        .stdout(predicate::str::contains("Bank Transfer"))
        .stdout(predicate::str::contains("Returned Products (1) -50.00"))
        .stdout(predicate::str::contains("Defective items").not())
        .stdout(predicate::str::contains("Wood Panel").not());
}

#[test]
fn test_history_expand_all() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1", "--expand-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Defective items"))
        .stdout(predicate::str::contains("Product Return"))
        .stdout(predicate::str::contains("Customer loyalty discount"))
        .stdout(predicate::str::contains("Wood Panel"))
        .stdout(predicate::str::contains("No products found for this payment."))
        .stdout(predicate::str::contains("No payments have been made yet."));
}

#[test]
fn test_history_page_size() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1", "--limit", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 items per page"));

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1", "--limit", "15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page size 15"));
}

#[test]
fn test_history_invalid_expand() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "history",
            "1",
            "--expand",
            "p1:invoices",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown section 'invoices'"));
}

#[test]
fn test_history_from_files() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);
    use_file_source(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sale #INV-2023-002"))
        .stdout(predicate::str::contains("INV-2023-003").not())
        .stdout(predicate::str::contains("Page 1 of 1 | 2 items"));

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("770.00"))
        .stdout(predicate::str::contains(
            "Page 2 is out of range: 2 items fit on 1 page(s) of 10.",
        ))
        .stdout(predicate::str::contains("No debts found").not());
}

#[test]
fn test_history_summary_matches_debtor_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);
    fs::write(
        config_path.join("config.toml"),
        "[source]\nkind = \"files\"\n\n[store]\npage_size = 10\n",
    )
    .unwrap();

    let mut content = fs::read_to_string(config_path.join("data").join("1.toml")).unwrap();
    for i in 3..=12 {
        content.push_str(&format!(
            "\n[[records]]\n[records.payment]\nid = \"x{i}\"\nnumber = \"INV-X-{i}\"\n\
             created_at = \"2024-01-01T00:00:00Z\"\n\
             amounts = [{{ amount = 100, currency = \"USD\" }}]\n"
        ));
    }
    fs::write(config_path.join("data").join("1.toml"), content).unwrap();

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "debtors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,770.00 USD"));

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "1", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,770.00"))
        .stdout(predicate::str::contains("Page 2 of 2 | 12 items"));
}

#[test]
fn test_history_huge_page_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "history",
            "1",
            "--page",
            "18446744073709551615",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page 18446744073709551615"));
}

#[test]
fn test_history_unknown_debtor_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);
    use_file_source(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch debtor history"))
        .stderr(predicate::str::contains("Debtor '99' not found"));
}

#[test]
fn test_history_without_debts() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);
    use_file_source(&config_path);

    fs::write(
        config_path.join("data").join("2.toml"),
        r#"[debtor]
id = "2"
first_name = "Jane"
last_name = "Smith"
phone_number = "+9876543210"
email = "jane.smith@example.com"
"#,
    )
    .unwrap();

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "history", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith's Debt History"))
        .stdout(predicate::str::contains("No debts found for this debtor."));

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "export", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to export"));
}

#[test]
fn test_export_statement() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    init(&config_path);

    debtor_cmd()
        .args(["-C", config_path.to_str().unwrap(), "export", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported statement for John Doe"));

    let statement = config_path.join("exports").join("statement-1.json");
    let content = fs::read_to_string(statement).unwrap();
    assert!(content.contains("INV-2023-001"));
    assert!(content.contains("Outstanding"));
}

#[test]
fn test_export_to_custom_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("debtor-config");
    let out_dir = temp_dir.path().join("out");
    init(&config_path);

    debtor_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "export",
            "3",
            "-o",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Robert Johnson"));

    assert!(out_dir.join("statement-3.json").exists());
}
