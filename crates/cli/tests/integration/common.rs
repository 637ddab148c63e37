//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project directory.
///
/// Each test gets its own temporary project root; `dist/` inside it is the
/// default output directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty project.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// A project with webOS and Tizen shells, a webOS manifest, a bundler
  /// emitted `dist/index.html` and a module list.
  pub fn project() -> Self {
    let env = Self::empty();
    env.copy_fixture("package.json", "package.json");
    env.copy_fixture("webos.html", "platform/webos.html");
    env.copy_fixture("tizen.html", "platform/tizen.html");
    env.copy_fixture("appinfo.json", "platform/webos/appinfo.json");
    env.copy_fixture("generic.html", "dist/index.html");
    env.copy_fixture("generic.html", "index.html");
    env.copy_fixture("modules.json", "modules.json");
    env.write_file("dist/assets/index-4f2a.js", &"console.log('tv');\n".repeat(20));
    env.write_file("dist/assets/index-77b0.css", "body{margin:0}");
    env
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Default output directory.
  pub fn dist(&self) -> PathBuf {
    self.root().join("dist")
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn copy_fixture(&self, name: &str, relative_path: &str) {
    self.write_file(relative_path, &fixture_content(name));
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.root().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  /// Get a pre-configured Command for the tvb binary.
  ///
  /// Clears the platform selector inherited from the parent environment and
  /// points `--root` at the project.
  pub fn tvb_cmd(&self, subcommand: &str) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("tvb");
    cmd.env_remove("VITE_PLATFORM");
    cmd.env_remove("RUST_LOG");
    cmd.arg(subcommand).arg("--root").arg(self.root());
    cmd
  }
}
