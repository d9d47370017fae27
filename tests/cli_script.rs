use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finlit_cli").unwrap();
    cmd.env("FINLIT_CLI_SCRIPT", "1")
        .env("FINLIT_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_runs_budget_flow() {
    let home = TempDir::new().unwrap();
    let input = "budget add income 100 Salary\n\
                 budget add expense 40 Groceries\n\
                 budget summary\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added income of £100.00 for Salary."))
        .stdout(contains("Balance      : £60.00"));

    let json = std::fs::read_to_string(home.path().join("data").join("records.json")).unwrap();
    assert!(json.contains("\"Salary\""));
    assert!(json.contains("\"Groceries\""));
}

#[test]
fn script_mode_runs_calculators() {
    let home = TempDir::new().unwrap();
    let input = "loan add \"Car loan\" 120000 10 12\n\
                 loan list\n\
                 loan schedule 1\n\
                 emi 120000 10 12\n\
                 compound 1000 5 10\n\
                 score\n\
                 exit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added loan `Car loan` with EMI £10,550.00 over 12 months."))
        .stdout(contains("Total monthly EMI: £10,550.00"))
        .stdout(contains("Total payable : £126,600.00"))
        .stdout(contains("Monthly installment: £10,550.00"))
        .stdout(contains("Future value   : £1,647.01"))
        .stdout(contains("Score: 690 (Good)"));

    let json = std::fs::read_to_string(home.path().join("data").join("loans.json")).unwrap();
    assert!(json.contains("\"Car loan\""));
}

#[test]
fn ledgers_survive_between_runs() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("budget add expense 25 Books\nloan add Phone 1000 0 2\nloan pay 1\n")
        .assert()
        .success();

    script_command(&home)
        .write_stdin("budget list\nloan list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Books"))
        .stdout(contains("1/2"));
}

#[test]
fn validation_errors_keep_the_shell_running() {
    let home = TempDir::new().unwrap();
    let input = "budget add expense 20\n\
                 emi 0 10 12\n\
                 budget add income 10 Gift\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Please fill all fields!"))
        .stdout(contains("Loan amount must be greater than zero"))
        .stdout(contains("Added income of £10.00 for Gift."));
}

#[test]
fn oversized_loan_terms_are_rejected() {
    let home = TempDir::new().unwrap();
    let input = "loan add Forever 1000 5 2000000000\n\
                 emi 1000 5 3000000000\n\
                 loan list\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Duration cannot exceed 600 months"))
        .stdout(contains("No loans yet."));
}

#[test]
fn delete_without_confirmation_is_cancelled_in_script_mode() {
    let home = TempDir::new().unwrap();
    let input = "budget add expense 20 Taxi\n\
                 budget delete 1\n\
                 budget delete 1 --yes\n\
                 budget list\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Deletion cancelled."))
        .stdout(contains("Entry deleted."))
        .stdout(contains("No entries yet."));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("bugdet list\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `bugdet`"))
        .stdout(contains("`budget`"));
}

#[test]
fn version_reports_package_version() {
    let home = TempDir::new().unwrap();

    script_command(&home)
        .write_stdin("version\nversion --json\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"FinLit \d+\.\d+\.\d+").unwrap())
        .stdout(contains("\"git_hash\""));
}
