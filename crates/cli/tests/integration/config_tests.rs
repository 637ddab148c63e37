use super::common::TestEnv;

fn config_json(env: &TestEnv, args: &[&str]) -> serde_json::Value {
  let output = env.tvb_cmd("config").args(args).output().unwrap();
  assert!(
    output.status.success(),
    "config failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn config_exports_bundler_settings() {
  let env = TestEnv::project();
  env.write_file(".env", "VITE_API_URL=https://api.example.tv\nVITE_THEME=dark\n");

  let json = config_json(&env, &["--platform", "vida"]);

  assert_eq!(json["platform"], "vida");
  assert_eq!(json["env_mode"], "production");
  assert_eq!(json["base"], "./");
  assert_eq!(json["legacy"]["targets"][0], "chrome 47");
  assert_eq!(json["define"]["VITE_API_URL"], "https://api.example.tv");
  assert_eq!(json["define"]["VITE_THEME"], "dark");
  assert_eq!(json["define"]["VITE_APP_VERSION"], "1.4.0");
  assert!(json["define"]["VITE_BUILD_DATE"].is_string());
}

#[test]
fn development_mode_reads_development_env_files() {
  let env = TestEnv::project();
  env.write_file(".env", "VITE_APP_ENV=base\n");
  env.write_file(".env.development", "VITE_APP_ENV=dev\n");
  env.write_file(".env.production", "VITE_APP_ENV=prod\n");

  let json = config_json(&env, &["--mode", "development"]);

  assert_eq!(json["mode"], "development");
  assert_eq!(json["define"]["VITE_APP_ENV"], "dev");
}

#[test]
fn unset_keys_are_null() {
  let env = TestEnv::project();

  let json = config_json(&env, &[]);

  assert_eq!(json["platform"], "webos");
  assert!(json["define"]["VITE_SECRET_KEY"].is_null());
}
