use assert_cmd::Command;
use predicates::prelude::*;

fn kosh() -> Command {
    let mut cmd = Command::cargo_bin("kosh").unwrap();
    // Isolate settings from the developer's real ~/.config/kosh
    cmd.env("HOME", std::env::temp_dir());
    cmd
}

#[test]
fn report_summary_all_time() {
    kosh()
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("all time"))
        .stdout(predicate::str::contains("\u{20b9}"));
}

#[test]
fn report_summary_for_month() {
    kosh()
        .args(["report", "summary", "--month", "2026-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-05"));
}

#[test]
fn report_categories_lists_expenses() {
    kosh()
        .args(["report", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses by Category"))
        .stdout(predicate::str::contains("Bills"));
}

#[test]
fn report_cashflow_has_running_column() {
    kosh()
        .args(["report", "cashflow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Cash Flow"))
        .stdout(predicate::str::contains("Running"));
}

#[test]
fn txn_list_shows_seeded_rows() {
    kosh()
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions"))
        .stdout(predicate::str::contains("Rent transfer"))
        .stdout(predicate::str::contains("Net:"));
}

#[test]
fn txn_list_search_filters() {
    kosh()
        .args(["txn", "list", "--search", "netflix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix"))
        .stdout(predicate::str::contains("Rent transfer").not());
}

#[test]
fn txn_add_records_in_session() {
    kosh()
        .args([
            "txn",
            "add",
            "250",
            "--category",
            "food",
            "--description",
            "Lunch at canteen",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense"))
        .stdout(predicate::str::contains("Session balance:"));
}

#[test]
fn txn_add_rejects_unknown_category() {
    kosh()
        .args([
            "txn",
            "add",
            "250",
            "--category",
            "vacations",
            "--description",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Unknown category: vacations"));
}

#[test]
fn txn_add_rejects_bad_date() {
    kosh()
        .args([
            "txn",
            "add",
            "250",
            "--category",
            "food",
            "--description",
            "x",
            "--date",
            "05/01/2026",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn txn_delete_unknown_id_fails() {
    kosh()
        .args(["txn", "delete", "99999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Unknown transaction: #99999"));
}

#[test]
fn sms_list_shows_inbox() {
    kosh()
        .args(["sms", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SMS inbox"))
        .stdout(predicate::str::contains("HDFCBK"));
}

#[test]
fn sms_show_unknown_id_fails() {
    kosh()
        .args(["sms", "show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Unknown message: #999"));
}

#[test]
fn sms_scan_records_and_skips() {
    kosh()
        .args(["sms", "scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped (not a bank transaction)"))
        .stdout(predicate::str::contains("Scan complete:"));
}

#[test]
fn accounts_loans_show_emi() {
    kosh()
        .args(["accounts", "loans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loans"))
        .stdout(predicate::str::contains("EMI"))
        .stdout(predicate::str::contains("Outstanding"));
}

#[test]
fn accounts_debts_net_position() {
    kosh()
        .args(["accounts", "debts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Net position:"));
}

#[test]
fn budgets_report_current_month() {
    kosh()
        .args(["budgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budgets"));
}

#[test]
fn goals_show_progress_bars() {
    kosh()
        .args(["goals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Savings Goals"))
        .stdout(predicate::str::contains("%"));
}

#[test]
fn init_writes_settings_file() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("kosh").unwrap();
    cmd.env("HOME", home.path())
        .args(["init", "--name", "Asha", "--months", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Asha."));
    let path = home.path().join(".config/kosh/settings.json");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("\"user_name\": \"Asha\""));
    assert!(content.contains("\"months_of_history\": 3"));
}

#[test]
fn unknown_subcommand_fails() {
    kosh().arg("frobnicate").assert().failure();
}
