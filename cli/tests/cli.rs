use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_roster() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("monsters");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("stonejaw.csv"), "hp,moveName,movePower,speed\n10,Crush,50,5\n").unwrap();
    fs::write(data.join("pebble.csv"), "hp,moveName,movePower,speed\n10,Flick,1,5\n").unwrap();
    fs::write(data.join("broken.csv"), "hp,moveName\n10,Crush\n").unwrap();
    dir
}

fn cli(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("monster-battle").expect("binary built");
    cmd.arg("--data-dir")
        .arg(dir.path().join("monsters"))
        .arg("--public-dir")
        .arg(dir.path().join("public"));
    cmd
}

#[test]
fn list_prints_one_name_per_line() {
    let dir = fixture_roster();
    cli(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("broken\npebble\nstonejaw\n");
}

#[test]
fn list_json_wraps_names() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"names":["broken","pebble","stonejaw"]}"#));
}

#[test]
fn show_prints_the_monster_payload() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["show", "stonejaw"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""moveName":"Crush""#))
        .stdout(predicate::str::contains(r#""movePower":50"#))
        .stdout(predicate::str::contains("imageUrl").not());
}

#[test]
fn show_distinguishes_missing_and_malformed() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["show", "ghost"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Not found"));
    cli(&dir)
        .args(["show", "broken"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("movePower"));
}

#[test]
fn config_file_supplies_the_data_dir() {
    let dir = fixture_roster();
    let cfg = dir.path().join("roster.yaml");
    fs::write(&cfg, format!("data_dir: {}\n", dir.path().join("monsters").display())).unwrap();
    Command::cargo_bin("monster-battle")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pebble"));
}

#[test]
fn auto_battle_runs_to_a_winner() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["battle", "stonejaw", "pebble", "--auto"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first: stonejaw"))
        .stdout(predicate::str::contains("HP left 0"))
        .stdout(predicate::str::contains("Winner: stonejaw"));
}

#[test]
fn interactive_battle_rejects_out_of_turn_attacks() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["battle", "pebble", "stonejaw"])
        .write_stdin("2\n1\n2\n1\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Not your turn, P2."))
        .stdout(predicate::str::contains("P1: pebble used Flick!"))
        .stdout(predicate::str::contains("Winner: stonejaw"))
        .stderr(predicate::str::contains("The battle is over"));
}

#[test]
fn battle_with_unknown_monster_fails_cleanly() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["battle", "stonejaw", "ghost", "--auto"])
        .assert()
        .code(4);
}

#[test]
fn show_pretty_indents_the_payload() {
    let dir = fixture_roster();
    cli(&dir)
        .args(["show", "pebble", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"monster\": {\n"))
        .stdout(predicate::str::contains(r#""moveName": "Flick""#));
}

#[test]
fn reset_command_restarts_a_finished_battle() {
    let dir = fixture_roster();
    let out = cli(&dir)
        .args(["battle", "pebble", "stonejaw"])
        .write_stdin("1\n2\nr\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Winner: stonejaw"))
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(out.matches("Battle start!").count(), 2);
    let (_, after_reset) = out.rsplit_once("Battle start!").unwrap();
    assert_eq!(after_reset.matches("[####################] 10/10").count(), 2);
    assert!(!after_reset.contains("Winner"));
}

#[test]
fn auto_battle_stops_at_the_turn_cap() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("monsters");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("statue.csv"), "hp,moveName,movePower\n10,Stare,0\n").unwrap();
    fs::write(data.join("gargoyle.csv"), "hp,moveName,movePower\n10,Glare,0\n").unwrap();

    cli(&dir)
        .args(["battle", "statue", "gargoyle", "--auto", "--max-turns", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("takes 0 damage (HP left 10)"))
        .stdout(predicate::str::contains("No winner after 6 attacks"))
        .stdout(predicate::str::contains("Winner").not());
}
