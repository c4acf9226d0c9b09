use predicates::prelude::*;

use super::common::TestEnv;

fn populate(env: &TestEnv) {
  env.write_file("assets/logo.png", "png");
  env.write_file("assets/engines/v8.mr", "engine");
  env.write_file("dependencies/runtime/x64/SDL2.dll", "sdl");
  env.write_file("dependencies/runtime/x64/nested/zlib.dll", "zlib");
  env.write_file("dependencies/runtime/x64/SDL2.lib", "import library");
  env.write_file("project/engine-sim.exe", "MZ");
}

#[test]
fn package_builds_output_tree() {
  let env = TestEnv::project();
  populate(&env);
  env.write_file("workspace/build/stale.txt", "from last build");

  env
    .shipkit_cmd()
    .args(["package", "application", "x64", "engine-sim"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaging engine-sim"))
    .stdout(predicate::str::contains("Packaging complete"))
    .stderr(predicate::str::contains("Copying resource: assets"))
    .stderr(predicate::str::contains("optional resource not found"));

  let build = env.root().join("workspace/build");
  assert!(build.join("assets/logo.png").is_file());
  assert!(build.join("assets/engines/v8.mr").is_file());
  assert!(build.join("SDL2.dll").is_file());
  assert!(build.join("zlib.dll").is_file());
  assert!(build.join("engine-sim.exe").is_file());
  assert!(!build.join("SDL2.lib").exists());
  assert!(!build.join("nested").exists());
  assert!(!build.join("stale.txt").exists());
}

#[test]
fn package_json_report() {
  let env = TestEnv::project();
  populate(&env);

  let output = env
    .shipkit_cmd()
    .args(["package", "application", "x64", "engine-sim", "-o", "json"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["title"], "Packaging engine-sim");
  assert_eq!(report["resources"][0]["name"], "assets");
  assert_eq!(report["resources"][0]["status"], "copied");
  assert_eq!(report["resources"][0]["files"], 2);
  assert_eq!(report["resources"][1]["status"], "skipped_optional");
  assert_eq!(report["resources"][2]["kind"], "dlls");
  assert_eq!(report["resources"][2]["files"], 2);
}

#[test]
fn package_wrong_argument_count_is_usage_error() {
  let env = TestEnv::project();

  env
    .shipkit_cmd()
    .args(["package", "application", "x64"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("expected 2 argument(s) (architecture, project_name), got 1"));

  assert!(!env.root().join("workspace").exists());
}

#[test]
fn package_unknown_profile_fails() {
  let env = TestEnv::project();

  env
    .shipkit_cmd()
    .args(["package", "installer"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("unknown profile 'installer'"))
    .stderr(predicate::str::contains("application, shaders"));
}

#[test]
fn missing_required_folder_is_reported_but_not_fatal() {
  let env = TestEnv::project();

  env
    .shipkit_cmd()
    .args(["package", "shaders"])
    .assert()
    .success()
    .stderr(predicate::str::contains("could not find resource"))
    .stderr(predicate::str::contains("1 required resource could not be found"));
}

#[test]
fn existing_folder_target_is_fatal() {
  let env = TestEnv::project();
  env.write_file("shaders/basic.glsl", "void main() {}");
  env.write_file("workspace/build/shaders/old.glsl", "old");

  env
    .shipkit_cmd()
    .args(["package", "shaders"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("could not copy resource 'shaders'"));
}

#[test]
fn missing_binary_fails() {
  let env = TestEnv::project();
  env.write_file("assets/logo.png", "png");

  env
    .shipkit_cmd()
    .args(["package", "application", "x64", "engine-sim"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("failed to copy file for resource 'binaries'"));

  // Earlier resources stay in place.
  assert!(env.root().join("workspace/build/assets/logo.png").is_file());
}

#[test]
fn explicit_manifest_flag_overrides_environment() {
  let env = TestEnv::project();
  env.write_file("other/shipkit.toml", "[profiles.empty]\n");

  env
    .shipkit_cmd()
    .args(["package", "empty", "--manifest"])
    .arg(env.root().join("other/shipkit.toml"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Packaging empty"));
}

#[test]
fn missing_manifest_fails() {
  let env = TestEnv::empty();

  env
    .shipkit_cmd()
    .args(["package", "application"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("manifest not found"));
}
