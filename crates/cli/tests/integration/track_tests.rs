use predicates::prelude::*;

use super::common::TestEnv;

fn populate(env: &TestEnv) {
  env.write_file("src/main.cpp", "int main() {\n  return 0;\n}\n");
  env.write_file("src/engine/engine.cpp", "// engine\n");
  env.write_file("include/engine.h", "#pragma once\n\nclass Engine;\n");
  env.write_file("include/sqlite3.h", "/* vendored */\n/* ignored */\n");
}

#[test]
fn track_creates_tracking_file() {
  let env = TestEnv::project();
  populate(&env);

  env
    .shipkit_cmd()
    .arg("track")
    .assert()
    .success()
    .stdout(predicate::str::contains("No earlier builds recorded"))
    .stdout(predicate::str::contains("Recorded build 1"))
    .stdout(predicate::str::contains("Lines in .cpp files: 4"))
    .stdout(predicate::str::contains("Lines in .h files: 3"))
    .stdout(predicate::str::contains("Lines of code: 7"));

  let content = env.read_file("workspace/tracking/build_version.txt");
  let lines: Vec<_> = content.lines().collect();
  assert_eq!(lines[0], "Build Information");
  assert_eq!(lines[1], "Generated by shipkit");
  assert_eq!(lines[2], "BUILD VERSION: 1");
  assert_eq!(lines[3], "");
  assert!(lines[4].starts_with("Build\t"));
  assert!(lines[4].ends_with("\t7\t1"));
  assert_eq!(lines.len(), 5);
}

#[test]
fn track_twice_keeps_history() {
  let env = TestEnv::project();
  populate(&env);

  env.shipkit_cmd().arg("track").assert().success();
  env.write_file("src/extra.cpp", "a\nb\n");
  env
    .shipkit_cmd()
    .arg("track")
    .assert()
    .success()
    .stdout(predicate::str::contains("Recorded build 2"))
    .stdout(predicate::str::contains("No earlier builds recorded").not());

  let content = env.read_file("workspace/tracking/build_version.txt");
  let lines: Vec<_> = content.lines().collect();
  assert_eq!(lines[2], "BUILD VERSION: 2");
  assert!(lines[4].ends_with("\t9\t2"));
  assert!(lines[5].ends_with("\t7\t1"));
  assert_eq!(lines.len(), 6);
}

#[test]
fn track_imports_legacy_file() {
  let env = TestEnv::project();
  populate(&env);
  env.write_file(
    "workspace/tracking/BuildVersion.txt",
    "Template 2019 Build Information\nOld header\nBUILD VERSION: 310\n\nBuild\t2019-06-01 10:00\t40000\t310\n",
  );

  env
    .shipkit_cmd()
    .arg("track")
    .assert()
    .success()
    .stdout(predicate::str::contains("Recorded build 311"))
    .stderr(predicate::str::contains("importing legacy tracking file"));

  let content = env.read_file("workspace/tracking/build_version.txt");
  assert!(content.contains("Build\t2019-06-01 10:00\t40000\t310"));
}

#[test]
fn track_json_output() {
  let env = TestEnv::project();
  populate(&env);

  let output = env.shipkit_cmd().args(["track", "-o", "json"]).output().unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["build_number"], 1);
  assert_eq!(report["lines"]["total"], 7);
  assert_eq!(report["lines"]["by_extension"][".h"], 3);
}

#[test]
fn track_without_tracker_section_fails() {
  let env = TestEnv::with_manifest("[profiles.app]\n");

  env
    .shipkit_cmd()
    .arg("track")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("has no [tracker] section"));
}
