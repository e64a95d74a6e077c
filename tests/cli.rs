use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const FIRST_LEVEL_SOLUTION: &str = "RRRRRRRDDDLULD ULLLLULDDDD URRDLDRR";

fn level_pack() -> NamedTempFile {
    let pack = "; corridor\n#####\n#@$*#\n#####\n\n; two steps\n######\n#@ $*#\n######\n";
    let mut tmp = NamedTempFile::new().expect("temp level pack");
    tmp.write_all(pack.as_bytes()).expect("write level pack");
    tmp
}

#[test]
fn cli_solves_first_builtin_level() {
    let mut cmd = Command::cargo_bin("sokoban-runtime").expect("binary exists");
    cmd.arg("--moves").arg(FIRST_LEVEL_SOLUTION).arg("--mute");
    cmd.assert()
        .success()
        .stdout(contains("Loaded 2 level(s)"))
        .stdout(contains("Level 1 completed"))
        .stdout(contains(
            "Final state: level 2/2 playing: 0/2 boxes on goals, 0 moves, 0 pushes",
        ))
        .stdout(contains("#  @      #"));
}

#[test]
fn cli_plays_level_pack_with_restart_and_wrap() {
    let pack = level_pack();
    let mut cmd = Command::cargo_bin("sokoban-runtime").expect("binary exists");
    cmd.arg("--levels")
        .arg(pack.path())
        .arg("--wrap")
        .arg("--moves")
        .arg("R R ! RR");
    cmd.assert()
        .success()
        .stdout(contains("Loaded 2 level(s)"))
        .stdout(contains("Level 1 completed"))
        .stdout(contains("Restarted level 2"))
        .stdout(contains("Level 2 completed"))
        .stdout(contains(
            "Final state: level 1/2 playing: 0/1 boxes on goals, 0 moves, 0 pushes",
        ))
        .stdout(contains("#@$*#"));
}

#[test]
fn cli_rejects_unknown_moves() {
    let mut cmd = Command::cargo_bin("sokoban-runtime").expect("binary exists");
    cmd.arg("--moves").arg("UQ");
    cmd.assert().failure().stderr(contains("Unknown move 'Q'"));
}

#[test]
fn cli_reports_missing_level_pack() {
    let mut cmd = Command::cargo_bin("sokoban-runtime").expect("binary exists");
    cmd.arg("--levels").arg("/no/such/levels.txt");
    cmd.assert()
        .failure()
        .stderr(contains("failed to load levels from /no/such/levels.txt"));
}
