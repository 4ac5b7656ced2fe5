use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("pagefeat").unwrap()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("words"))
        .stdout(predicate::str::contains("images"))
        .stdout(predicate::str::contains("feats"));
}

#[test]
fn text_subcommand_help() {
    cmd()
        .args(["text", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--pages"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--unicode-norm"))
        .stdout(predicate::str::contains("--bidi"));
}

#[test]
fn images_subcommand_help() {
    cmd()
        .args(["images", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--min-size"))
        .stdout(predicate::str::contains("--cross-page-duplicates"))
        .stdout(predicate::str::contains("--flip-y"));
}

#[test]
fn missing_file_argument_fails() {
    cmd().arg("text").assert().failure();
}

#[test]
fn unknown_subcommand_fails() {
    cmd().args(["tables", "doc.events"]).assert().failure();
}

#[test]
fn nonexistent_file_exits_with_one() {
    cmd()
        .args(["text", "/nonexistent/doc.events"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pagefeat"));
}
