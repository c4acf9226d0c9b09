use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn init_writes_starter_manifest() {
  let env = TestEnv::empty();

  env
    .shipkit_cmd()
    .args(["init", "scripts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created shipkit manifest"));

  let content = env.read_file("scripts/shipkit.toml");
  assert!(content.contains("[profiles.application]"));
  assert!(content.contains("[profiles.delta]"));
  assert!(content.contains("[profiles.dlls]"));
  assert!(content.contains("[tracker]"));
}

#[test]
fn init_then_vars_resolves_stock_profile() {
  let env = TestEnv::empty();
  env.shipkit_cmd().args(["init", "scripts"]).assert().success();

  env
    .shipkit_cmd()
    .args(["vars", "dlls", "x64", "Debug"])
    .assert()
    .success()
    .stdout(predicate::str::contains("architecture"))
    .stdout(predicate::str::contains("Debug"));
}

#[test]
fn init_refuses_to_overwrite() {
  let env = TestEnv::project();

  env
    .shipkit_cmd()
    .args(["init", "scripts"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("file already exists"));

  assert!(env.read_file("scripts/shipkit.toml").contains("[profiles.shaders]"));
}
