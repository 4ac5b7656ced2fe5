//! Integration tests for the `feats` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("pagefeat").unwrap()
}

fn write_dump(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".events").tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn feats_interleave_glyphs_and_paths() {
    let dump = write_dump(
        "PAGE\t1\t800\n\
         0\tGLYPH\tA\t72\t100\t8\t12\tHelvetica\t12\t3\n\
         1\tMOVE_TO\t72\t700\n\
         1\tLINE_TO\t300\t700\n\
         2\tSTROKE\n\
         3\tCLIP\tevenodd\n\
         4\tSHADING_FILL\tSh0\n",
    );
    cmd()
        .arg("feats")
        .arg(dump.path())
        .assert()
        .success()
        .stdout(
            "1\tA\t72\t100\t8\t12\tHelvetica\t12\t3\n\
             [MOVE_TO]\t72\t100\n\
             [LINE_TO]\t300\t100\n\
             [STROKE_PATH]\n\
             [CLIP]\tevenodd\n\
             [SHADING_FILL]\tSh0\n",
        );
}

#[test]
fn ordering_violation_exits_with_one() {
    let dump = write_dump(
        "PAGE\t1\t800\n\
         0\tGLYPH\tA\t72\t100\t8\t12\tHelvetica\t12\t3\n\
         0\tMOVE_TO\t72\t700\n",
    );
    cmd()
        .arg("feats")
        .arg(dump.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed input ordering"));
}

#[test]
fn ordering_violation_fails_text_too() {
    let dump = write_dump(
        "PAGE\t3\t800\n\
         9\tGLYPH\tA\t72\t100\t8\t12\tHelvetica\t12\t3\n\
         9\tFILL\tnonzero\n",
    );
    cmd()
        .arg("text")
        .arg(dump.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cursor 9 on page 3"));
}

#[test]
fn unknown_event_kind_is_skipped() {
    let dump = write_dump(
        "PAGE\t1\t800\n\
         0\tMARKED_CONTENT\tSpan\n\
         1\tEND_PATH\n",
    );
    cmd()
        .arg("feats")
        .arg(dump.path())
        .assert()
        .success()
        .stdout("[END_PATH]\n");
}
