use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gstr(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gstr").unwrap();
    // Keep runs independent of any config in the user's home
    cmd.arg("--config").arg(dir.join("config.json"));
    cmd
}

fn write_draft(dir: &Path, name: &str, gstin: &str, quantity: u32, stock: u32) -> PathBuf {
    let path = dir.join(name);
    let json = format!(
        r#"{{
            "kind": "sales",
            "invoice_no": "NLTE/2024-25/007",
            "invoice_date": "2024-10-02",
            "counterparty": {{"name": "Sharma Traders", "gstin": "{gstin}"}},
            "items": [
                {{"name": "Ceiling Fan", "hsnCode": "8414", "quantity": {quantity}, "price": 100, "gstRate": 18, "discount": 0, "stock": {stock}}}
            ],
            "freight": 50
        }}"#
    );
    fs::write(&path, json).unwrap();
    path
}

fn setup() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    gstr(dir.path()).args(["config", "init"]).assert().success();
    dir
}

#[test]
fn calc_intra_state_text() {
    let dir = setup();
    let draft = write_draft(dir.path(), "local.json", "23CAWPV8800M1ZT", 2, 10);

    gstr(dir.path())
        .args(["calc", "--format", "text"])
        .arg(&draft)
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal:    ₹200.00"))
        .stdout(predicate::str::contains("CGST:        ₹22.50"))
        .stdout(predicate::str::contains("SGST:        ₹22.50"))
        .stdout(predicate::str::contains("IGST:        ₹0.00"))
        .stdout(predicate::str::contains("Grand Total: ₹295.00"))
        .stdout(predicate::str::contains(
            "Rupees Two Hundred and Ninety Five Only",
        ));
}

#[test]
fn calc_inter_state_text() {
    let dir = setup();
    let draft = write_draft(dir.path(), "remote.json", "27AAPFU0939F1ZV", 2, 10);

    gstr(dir.path())
        .args(["calc", "-f", "text"])
        .arg(&draft)
        .assert()
        .success()
        .stdout(predicate::str::contains("CGST:        ₹0.00"))
        .stdout(predicate::str::contains("IGST:        ₹45.00"))
        .stdout(predicate::str::contains("Grand Total: ₹295.00"));
}

#[test]
fn calc_csv_export() {
    let dir = setup();
    let draft = write_draft(dir.path(), "local.json", "23CAWPV8800M1ZT", 2, 10);
    let out = dir.path().join("invoice.csv");

    gstr(dir.path())
        .args(["calc", "--format", "csv", "--output"])
        .arg(&out)
        .arg(&draft)
        .assert()
        .success();

    let csv = fs::read_to_string(out).unwrap();
    assert!(csv.contains("Description,HSN,Qty,Price,Disc%,GST%,Total"));
    assert!(csv.contains("Ceiling Fan,8414,2,100.00,0,18,236.00"));
    assert!(csv.contains("Grand Total,,,,,,295.00"));
}

#[test]
fn calc_assigns_invoice_number() {
    let dir = setup();
    let draft = write_draft(dir.path(), "local.json", "23CAWPV8800M1ZT", 2, 10);

    gstr(dir.path())
        .args(["calc", "--assign-number", "41"])
        .arg(&draft)
        .assert()
        .success()
        .stdout(predicate::str::contains("NLTE/2024-25/042"));
}

#[test]
fn calc_strict_rejects_overselling() {
    let dir = setup();
    let draft = write_draft(dir.path(), "oversold.json", "23CAWPV8800M1ZT", 5, 3);

    gstr(dir.path())
        .args(["calc", "--strict"])
        .arg(&draft)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds available stock 3"));
}

#[test]
fn calc_missing_file() {
    let dir = setup();

    gstr(dir.path())
        .args(["calc", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn calc_rejects_oversized_price() {
    let dir = setup();
    let draft = dir.path().join("huge.json");
    fs::write(
        &draft,
        r#"{
            "invoice_no": "NLTE/2024-25/008",
            "invoice_date": "2024-10-02",
            "counterparty": {"name": "Sharma Traders", "gstin": "23CAWPV8800M1ZT"},
            "items": [{"name": "Bulk", "quantity": 4000000000, "price": "100000000000000000000"}]
        }"#,
    )
    .unwrap();

    gstr(dir.path())
        .arg("calc")
        .arg(&draft)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn batch_writes_summary() {
    let dir = setup();
    let drafts = dir.path().join("drafts");
    fs::create_dir_all(&drafts).unwrap();
    write_draft(&drafts, "a.json", "23CAWPV8800M1ZT", 2, 10);
    write_draft(&drafts, "b.json", "27AAPFU0939F1ZV", 1, 10);
    fs::write(drafts.join("broken.json"), "{ not json").unwrap();
    let out = dir.path().join("out");

    gstr(dir.path())
        .arg("batch")
        .arg(drafts.join("*.json").to_string_lossy().to_string())
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 3 drafts"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.matches(",ok,").count(), 2);
    assert_eq!(summary.matches(",error,").count(), 1);
    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = setup();
    let drafts = dir.path().join("drafts");
    fs::create_dir_all(&drafts).unwrap();
    fs::write(drafts.join("broken.json"), "{ not json").unwrap();

    gstr(dir.path())
        .arg("batch")
        .arg(drafts.join("*.json").to_string_lossy().to_string())
        .assert()
        .failure();
}

#[test]
fn gstin_command() {
    let dir = setup();

    gstr(dir.path())
        .args(["gstin", "23CAWPV8800M1ZT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("state 23 PAN CAWPV8800M"));

    gstr(dir.path())
        .args(["gstin", "23CAWPV8800M1ZT", "29AABCU9603R1ZM"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("check character mismatch"));
}

#[test]
fn words_command() {
    let dir = setup();

    gstr(dir.path())
        .args(["words", "123456.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹1,23,456.50"))
        .stdout(predicate::str::contains(
            "Rupees One Lakh Twenty Three Thousand Four Hundred and Fifty Six and Fifty Paise Only",
        ));

    gstr(dir.path()).args(["words", "abc"]).assert().failure();
}

#[test]
fn profit_command() {
    let dir = setup();
    let rows = dir.path().join("profit.json");
    fs::write(
        &rows,
        r#"[
            {"itemName": "Fan", "buyingPrice": 1000, "totalQuantitySold": 3, "averageSellingPrice": 1200, "totalCommission": 0, "totalProfit": 600},
            {"itemName": "Cooler", "buyingPrice": 5000, "totalQuantitySold": 2, "averageSellingPrice": 6000, "totalCommission": 100, "totalProfit": 1900}
        ]"#,
    )
    .unwrap();

    gstr(dir.path())
        .arg("profit")
        .arg(&rows)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total profit: ₹2,500.00"))
        .stdout(predicate::str::contains("Top item: Cooler"));
}

#[test]
fn config_set_changes_home_state() {
    let dir = setup();
    let draft = write_draft(dir.path(), "local.json", "23CAWPV8800M1ZT", 2, 10);

    gstr(dir.path())
        .args(["config", "set", "tax.seller_jurisdiction", "27"])
        .assert()
        .success();

    gstr(dir.path())
        .args(["config", "get", "tax.seller_jurisdiction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"27\""));

    // Counterparty in 23 is now out of state
    gstr(dir.path())
        .args(["calc", "--format", "text"])
        .arg(&draft)
        .assert()
        .success()
        .stdout(predicate::str::contains("IGST:        ₹45.00"));

    gstr(dir.path())
        .args(["config", "set", "tax.seller_jurisdiction", "MP1"])
        .assert()
        .failure();
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = setup();

    gstr(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    gstr(dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}
