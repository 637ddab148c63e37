/// Environment key carrying the platform selector.
pub const PLATFORM_ENV_KEY: &str = "VITE_PLATFORM";

/// Directory (relative to the project root) holding shells and manifests.
pub const PLATFORM_DIR: &str = "platform";

/// Fixed filename of the deliverable's entry document.
pub const ENTRY_HTML: &str = "index.html";

/// Default output directory, relative to the project root.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Script injected into development documents so the standalone devtools attach.
pub const DEV_TOOLS_SCRIPT: &str = r#"<script src="http://localhost:8097"></script>"#;

/// Public base path the bundler rewrites asset URLs against.
pub const BASE_PATH: &str = "./";

/// Per-project state directory, relative to the project root.
pub const STATE_DIR: &str = ".tvbuild";
