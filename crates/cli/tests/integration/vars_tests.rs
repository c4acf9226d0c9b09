use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn vars_lists_resolved_values_in_order() {
  let env = TestEnv::project();

  let output = env
    .shipkit_cmd()
    .args(["vars", "application", "x64", "engine-sim"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();
  let names: Vec<_> = stdout
    .lines()
    .filter_map(|line| line.split_whitespace().next())
    .collect();
  assert_eq!(
    names,
    vec!["manifest_dir", "architecture", "project_name", "root", "output", "dll_dir"]
  );
  assert!(stdout.contains("/dependencies/runtime/x64"));
}

#[test]
fn vars_json_output() {
  let env = TestEnv::project();

  let output = env
    .shipkit_cmd()
    .args(["vars", "application", "x64", "engine-sim", "-o", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let vars: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(vars["architecture"], "x64");
  assert_eq!(vars["project_name"], "engine-sim");
  assert!(vars["output"].as_str().unwrap().ends_with("/../workspace/build"));
}

#[test]
fn vars_reports_undefined_variable() {
  let env = TestEnv::with_manifest(
    r#"
[profiles.broken]
variables = [
  { name = "output", value = "{workspace}/build" },
  { name = "workspace", value = "{manifest_dir}/workspace" },
]
"#,
  );

  env
    .shipkit_cmd()
    .args(["vars", "broken"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("variable 'output': undefined variable 'workspace'"));
}

#[test]
fn vars_rejects_unknown_resource_kind() {
  let env = TestEnv::with_manifest(
    r#"
[profiles.app]
resources = [{ name = "docs", source = "a", target = "b", kind = "archive" }]
"#,
  );

  env
    .shipkit_cmd()
    .args(["vars", "app"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("failed to parse manifest"));
}
