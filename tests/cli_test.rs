use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const DATASET: &str = r#"{
    "customers": {
        "1": {
            "customer_id": 1,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "dob": "1990-06-01",
            "email": "ada@example.com",
            "phone": "555-0100",
            "address": "1 Main St",
            "status": "ACTIVE",
            "created_at": "2024-01-01T09:00:00",
            "updated_at": "2024-01-01T09:00:00"
        }
    },
    "accounts": {
        "1": {
            "account_id": 1,
            "branch_id": 1,
            "customer_id": 1,
            "account_number": "ACCT1",
            "type": "SAVINGS",
            "balance": 500,
            "opened_date": "2024-01-01",
            "status": "OPEN",
            "created_at": "2024-01-01T09:00:00",
            "updated_at": "2024-01-01T09:00:00"
        }
    }
}"#;

fn write_dataset(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("data.json");
    std::fs::write(&path, DATASET).unwrap();
    path
}

#[test]
fn deposit_prints_transaction_and_persists_balance() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = write_dataset(&dir);

    let mut cmd = Command::new(cargo_bin!());
    cmd.args(["--data", path.to_str().unwrap(), "deposit", "1", "250", "BRANCH"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"DEPOSIT\""))
        .stdout(predicate::str::contains("\"transaction_id\": 1"));

    let saved = std::fs::read_to_string(&path)?;
    let data: serde_json::Value = serde_json::from_str(&saved)?;
    assert_eq!(data["accounts"]["1"]["balance"], serde_json::json!(750.0));
    assert!(data["transactions"]["1"].is_object());

    Ok(())
}

#[test]
fn overdrawn_withdrawal_fails_and_leaves_dataset_untouched(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = write_dataset(&dir);

    let mut cmd = Command::new(cargo_bin!());
    cmd.args(["--data", path.to_str().unwrap(), "withdraw", "1", "700", "ATM"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("insufficient funds"));

    // The failing run must not rewrite the file.
    let saved = std::fs::read_to_string(&path)?;
    assert_eq!(saved, DATASET);

    Ok(())
}
