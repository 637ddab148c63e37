use predicates::prelude::*;

use super::common::{TestEnv, fixture_content};

const DEV_TOOLS_SCRIPT: &str = r#"<script src="http://localhost:8097"></script>"#;

#[test]
fn release_build_merges_into_platform_shell() {
  let env = TestEnv::project();

  env
    .tvb_cmd("build")
    .args(["--modules", "modules.json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built webos (release)"));

  let html = env.read_file("dist/index.html");
  let shell_script = html.find("webOSTV.js").unwrap();
  let module_script = html.find("index-4f2a.js").unwrap();
  let legacy_script = html.find("vite-legacy-entry").unwrap();
  let stylesheet = html.find("index-77b0.css").unwrap();
  assert!(shell_script < module_script);
  assert!(module_script < legacy_script);
  assert!(legacy_script < stylesheet);
  assert!(html.contains("<title>TV App</title>"));
  assert!(!html.contains("Generic build"));
  assert!(!html.contains(DEV_TOOLS_SCRIPT));
  assert_eq!(html.matches("<head>").count(), 1);
  assert_eq!(html.matches("<body>").count(), 1);

  assert_eq!(env.read_file("dist/appinfo.json"), fixture_content("appinfo.json"));

  let report = env.read_file("dist/bundle-analysis-webos.html");
  assert!(report.contains("tv-app - WEBOS Bundle Analysis"));
  assert!(report.contains("vendor_corejs"));
  assert!(report.contains("vendor_styled"));
  assert!(report.contains("assets/index-4f2a.js"));
}

#[test]
fn platform_flag_selects_shell() {
  let env = TestEnv::project();

  env
    .tvb_cmd("build")
    .args(["--platform", "tizen"])
    .assert()
    .success()
    .stderr(predicate::str::contains("manifest not found"));

  let html = env.read_file("dist/index.html");
  assert!(html.contains("webapis.js"));
  assert!(!html.contains("webOSTV.js"));
  assert!(html.contains("index-4f2a.js"));
  assert!(!env.dist().join("appinfo.json").exists());
  assert!(env.dist().join("bundle-analysis-tizen.html").is_file());
}

#[test]
fn rebuilding_into_the_same_output_is_stable() {
  let env = TestEnv::project();

  env.tvb_cmd("build").assert().success();
  let first = env.read_file("dist/index.html");
  env.tvb_cmd("build").assert().success();
  let second = env.read_file("dist/index.html");

  assert_eq!(first, second);
  assert_eq!(second.matches("webOSTV.js").count(), 1);
  assert_eq!(second.matches("index-4f2a.js").count(), 1);
  assert!(env.root().join(".tvbuild/entries.json").is_file());
}

#[test]
fn each_platform_build_starts_from_bundler_output() {
  let env = TestEnv::project();

  for (platform, own, other) in [
    ("webos", "webOSTV.js", "webapis.js"),
    ("tizen", "webapis.js", "webOSTV.js"),
    ("webos", "webOSTV.js", "webapis.js"),
  ] {
    env.tvb_cmd("build").args(["--platform", platform]).assert().success();

    let html = env.read_file("dist/index.html");
    assert_eq!(html.matches(own).count(), 1, "{} entry: {}", platform, html);
    assert!(!html.contains(other), "{} entry: {}", platform, html);
    assert_eq!(html.matches("vite-legacy-entry").count(), 2);
    assert_eq!(html.matches("<head>").count(), 1);
  }
}

#[test]
fn platform_selector_is_read_from_environment() {
  let env = TestEnv::project();

  env
    .tvb_cmd("build")
    .env("VITE_PLATFORM", "TIZEN")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built tizen"));

  assert!(env.read_file("dist/index.html").contains("webapis.js"));
}

#[test]
fn platform_selector_is_read_from_mode_env_file() {
  let env = TestEnv::project();
  env.write_file(".env", "VITE_PLATFORM=webos\n");
  env.write_file(".env.production", "VITE_PLATFORM=tizen\n");

  env.tvb_cmd("build").assert().success();

  assert!(env.read_file("dist/index.html").contains("webapis.js"));
}

#[test]
fn development_build_passes_generic_document_through() {
  let env = TestEnv::project();

  env
    .tvb_cmd("build")
    .args(["--mode", "development"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built webos (development)"));

  let html = env.read_file("dist/index.html");
  assert!(html.contains("Generic build"));
  assert!(!html.contains("webOSTV.js"));
  assert_eq!(html.matches(DEV_TOOLS_SCRIPT).count(), 1);
  assert!(html.find(DEV_TOOLS_SCRIPT).unwrap() < html.find("</head>").unwrap());
  assert!(env.dist().join("appinfo.json").is_file());
  assert!(!env.dist().join("bundle-analysis-webos.html").exists());
}

#[test]
fn unknown_platform_fails() {
  let env = TestEnv::project();

  env
    .tvb_cmd("build")
    .args(["--platform", "roku"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("roku"))
    .stderr(predicate::str::contains("webos"));

  assert_eq!(env.read_file("dist/index.html"), fixture_content("generic.html"));
}

#[test]
fn missing_template_fails_without_writing_entry() {
  let env = TestEnv::project();

  env
    .tvb_cmd("build")
    .args(["--platform", "xbox"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("xbox.html"));

  assert_eq!(env.read_file("dist/index.html"), fixture_content("generic.html"));
}

#[test]
fn missing_generic_output_fails() {
  let env = TestEnv::empty();
  env.copy_fixture("webos.html", "platform/webos.html");

  env
    .tvb_cmd("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("generic bundler output not found"));
}

#[test]
fn custom_output_directory() {
  let env = TestEnv::project();
  env.copy_fixture("generic.html", "build/generic.html");

  env
    .tvb_cmd("build")
    .args(["--out", "package", "--generic", "build/generic.html", "--no-report"])
    .assert()
    .success();

  assert!(env.read_file("package/index.html").contains("webOSTV.js"));
  assert!(env.root().join("package/appinfo.json").is_file());
  assert!(!env.root().join("package/bundle-analysis-webos.html").exists());
}

#[test]
fn json_output_describes_outcome() {
  let env = TestEnv::project();

  let output = env
    .tvb_cmd("build")
    .args(["--modules", "modules.json", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["platform"], "webos");
  assert_eq!(json["mode"], "release");
  assert_eq!(json["manifest"]["status"], "staged");
  assert_eq!(json["chunks"]["vendor_corejs"]["modules"], 1);
  assert_eq!(json["chunks"]["vendor_styled"]["bytes"], 41000);
  assert_eq!(json["chunks"]["vendor"]["modules"], 1);
  assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}
