use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use assert_cmd::Command;
use tempfile::tempdir;

fn fast_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"{{"processing_delay_ms": 10, "success_notification_delay_ms": 5, "alert_duration_ms": 5}}"#
    )
    .unwrap();
    path
}

#[test]
fn test_cli_cash_out_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = fast_config(dir.path());

    let mut cmd = Command::new(cargo_bin!("walletflow"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .write_stdin("cash-out\ndigit 100\nconfirm\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[cash_out_entry] balance=$8,854.22 unread=0 entry=$100"))
        .stdout(predicate::str::contains("Processing Cash Out - Transferring to Chase Bank..."))
        .stdout(predicate::str::contains("[cash_success] balance=$8,754.22"))
        .stdout(predicate::str::contains(
            "ALERT alert-0: You successfully cashed out $100.00 to Chase Bank.",
        ))
        .stdout(predicate::str::contains("ALERT alert-0 dismissed"))
        .stdout(predicate::str::contains("final balance=$8,754.22 unread=1"));

    Ok(())
}

#[test]
fn test_cli_peer_payment_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = fast_config(dir.path());

    let mut cmd = Command::new(cargo_bin!("walletflow"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .write_stdin("dollar\ndigit 7.5\npay\nquery kate\nselect $LKhowz\npay\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("contacts: $LKhowz"))
        .stdout(predicate::str::contains("sent $7.5 to Kate Howard $LKhowz"))
        .stdout(predicate::str::contains("final balance=$8,854.22 unread=0"));

    Ok(())
}

#[test]
fn test_cli_reports_unknown_commands() {
    let mut cmd = Command::new(cargo_bin!("walletflow"));
    cmd.env_remove("RUST_LOG").write_stdin("withdraw 10\ninbox\n");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("unknown command: withdraw"))
        .stdout(predicate::str::contains("final balance=$8,854.22 unread=0"));
}

#[test]
fn test_cli_data_file_survives_restart() {
    let dir = tempdir().unwrap();
    let config = fast_config(dir.path());
    let data = dir.path().join("wallet.json");

    let mut first = Command::new(cargo_bin!("walletflow"));
    first
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("--data-file")
        .arg(&data)
        .write_stdin("add-cash\ndigit 46\nconfirm\n");
    first.assert().success();

    let mut second = Command::new(cargo_bin!("walletflow"));
    second
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("--data-file")
        .arg(&data)
        .write_stdin("");
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("final balance=$8,900.22 unread=1"));
}

#[test]
fn test_cli_rejects_bad_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{ not json").unwrap();

    let mut cmd = Command::new(cargo_bin!("walletflow"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .write_stdin("");
    cmd.assert().failure();
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("some_db");

    let mut cmd = Command::new(cargo_bin!("walletflow"));
    cmd.env_remove("RUST_LOG")
        .arg("--db-path")
        .arg(&db_path)
        .write_stdin("");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled.",
        ));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let config = fast_config(dir.path());
    let db_path = dir.path().join("test_db");

    let mut first = Command::new(cargo_bin!("walletflow"));
    first
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("--db-path")
        .arg(&db_path)
        .write_stdin("cash-out\ndigit 54\nconfirm\n");
    first
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN").not());

    let mut second = Command::new(cargo_bin!("walletflow"));
    second
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("--db-path")
        .arg(&db_path)
        .write_stdin("");
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("final balance=$8,800.22 unread=1"));
}
