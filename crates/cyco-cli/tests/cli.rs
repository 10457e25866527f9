use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn cyco() -> Command {
    Command::cargo_bin("cyco").unwrap()
}

#[test]
fn cyco_run_writes_case_with_proxy() {
    let out = tempdir().unwrap();
    let dynawo = repo_path("test_data/IEEE14");
    let helics = repo_path("test_data/helics");

    cyco()
        .args([
            "run",
            "--dynawo-dir",
            dynawo.to_str().unwrap(),
            "--helics-dir",
            helics.to_str().unwrap(),
            "-o",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"))
        .stdout(predicate::str::contains("Dynawo.json"));

    for name in [
        "IEEE14.jobs",
        "IEEE14.par",
        "IEEE14.dyd",
        "IEEE14.iidm",
        "IEEE14.crv",
        "Dynawo.json",
    ] {
        assert!(out.path().join(name).is_file(), "{name} was not written");
    }

    let dyd = fs::read_to_string(out.path().join("IEEE14.dyd")).unwrap();
    assert!(dyd.contains(
        r#"<dyn:blackBoxModel id="CosimInterface" lib="CosimulationAutomaton" parFile="IEEE14.par" parId="CosimInterface"/>"#
    ));
    assert!(dyd.contains(
        r#"<dyn:connect id1="GEN1" var1="generator_PGenPu" id2="CosimInterface" var2="automaton_inputs_1_"/>"#
    ));

    let par = fs::read_to_string(out.path().join("IEEE14.par")).unwrap();
    assert!(par.contains(r#"<set id="CosimInterface">"#));
    assert!(par.contains(r#"name="automaton_SamplingTime" value="1.0""#));
    assert!(par.contains(r#"name="automaton_NbInputs" value="2""#));

    let federate: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("Dynawo.json")).unwrap()).unwrap();
    assert_eq!(federate["name"], "Dynawo");
    assert_eq!(federate["period"], 0.5);
    assert_eq!(federate["publications"][1]["key"], "GEN1_Q");
}

#[test]
fn cyco_run_dry_run_writes_nothing() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("serialized");
    let dynawo = repo_path("test_data/IEEE14");
    let helics = repo_path("test_data/helics");

    cyco()
        .args([
            "run",
            "--dynawo-dir",
            dynawo.to_str().unwrap(),
            "--helics-dir",
            helics.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"));
    assert!(!out.exists());
}

#[test]
fn cyco_run_reads_config_file() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("out");
    let config = tmp.path().join("cyco.toml");
    fs::write(
        &config,
        format!(
            "[dynawo]\ndata_dir = {:?}\njobs = \"IEEE14.jobs\"\n\n[helics]\ndata_dir = {:?}\n\n[output]\ndir = {:?}\nfederate_name = \"Grid\"\n",
            repo_path("test_data/IEEE14").to_str().unwrap(),
            repo_path("test_data/helics").to_str().unwrap(),
            out.to_str().unwrap(),
        ),
    )
    .unwrap();

    cyco()
        .args(["--config", config.to_str().unwrap(), "run"])
        .assert()
        .success();
    assert!(out.join("Grid.json").is_file());
    assert!(out.join("IEEE14.jobs").is_file());
}

#[test]
fn cyco_run_without_jobs_file_fails() {
    let empty = tempdir().unwrap();
    let helics = repo_path("test_data/helics");
    cyco()
        .args([
            "run",
            "--dynawo-dir",
            empty.path().to_str().unwrap(),
            "--helics-dir",
            helics.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn cyco_run_with_unknown_jobs_name_fails() {
    let dynawo = repo_path("test_data/IEEE14");
    let helics = repo_path("test_data/helics");
    cyco()
        .args([
            "run",
            "--dynawo-dir",
            dynawo.to_str().unwrap(),
            "--helics-dir",
            helics.to_str().unwrap(),
            "--jobs",
            "missing.jobs",
            "--dry-run",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.jobs"));
}

#[test]
fn cyco_convert_round_trips_a_file() {
    let out = tempdir().unwrap();
    let target = out.path().join("copy.par");
    let input = repo_path("test_data/IEEE14/IEEE14.par");

    cyco()
        .args(["convert", input.to_str().unwrap(), target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"));

    let text = fs::read_to_string(&target).unwrap();
    assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(text.contains(r#"<par type="INT" name="order" value="2"/>"#));
}

#[test]
fn cyco_convert_rejects_format_change() {
    let out = tempdir().unwrap();
    let target = out.path().join("IEEE14.dyd");
    let input = repo_path("test_data/IEEE14/IEEE14.par");

    cyco()
        .args(["convert", input.to_str().unwrap(), target.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write"));
    assert!(!target.exists());
}

#[test]
fn cyco_convert_reports_unknown_extension() {
    let out = tempdir().unwrap();
    let input = out.path().join("notes.txt");
    fs::write(&input, "hello").unwrap();

    cyco()
        .args([
            "convert",
            input.to_str().unwrap(),
            out.path().join("notes.par").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown file format"));
}
