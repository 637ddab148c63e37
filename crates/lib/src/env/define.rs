//! Compile-time constants handed to the bundler for `process.env` substitution.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::EnvMap;

/// Keys copied verbatim from the build environment. Values are opaque.
pub const PASSTHROUGH_KEYS: &[&str] = &[
  "VITE_PLATFORM",
  "VITE_THEME",
  "VITE_APP_ENV",
  "VITE_API_URL",
  "VITE_BASEURL",
  "VITE_SECRET_KEY",
  "VITE_ACTIVATION_LINK_URL",
  "VITE_ACTIVATION_LINK_LABEL",
  "VITE_API_KEY",
  "VITE_HELP_LINK_URL",
  "VITE_MEDIASERVICE_BASEURL",
  "VITE_STATICPAGE_BASEURL",
  "VITE_STATIC_BASEURL_V2",
  "VITE_PINLOGIN_BASEURL",
  "VITE_DEFAULT_CDN_URL",
  "VITE_PLAYER_FETCH_PRODUCT_URL",
  "VITE_DEBUG_BUILD",
  "VITE_DEBUG_OVERLAY",
  "VITE_PLAYER_ANALYTICS_URL",
  "VITE_PLAYER_ENTITLEMENT_URL",
  "VITE_SECRETKEY_PLAYER",
  "VITE_BITMOVIN_LICENSE_KEY",
  "VITE_SEARCH_API_URL",
  "VITE_PROFILE_SCREEN_CONFIG_URL",
];

pub const APP_VERSION_KEY: &str = "VITE_APP_VERSION";
pub const BUILD_DATE_KEY: &str = "VITE_BUILD_DATE";

/// IST, the offset release stamps are reported in.
const BUILD_DATE_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
const BUILD_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// `process.env` replacement table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DefineTable(Map<String, Value>);

impl DefineTable {
  /// Build the table from the environment plus derived version/date values.
  ///
  /// Unset pass-through keys become `null` so the bundler still replaces them.
  pub fn build(env: &EnvMap, app_version: &str, built_at: DateTime<Utc>) -> Self {
    let mut map = Map::new();
    for key in PASSTHROUGH_KEYS {
      let value = env.get(key).map(|v| Value::String(v.to_string())).unwrap_or(Value::Null);
      map.insert((*key).to_string(), value);
    }
    map.insert(APP_VERSION_KEY.to_string(), Value::String(app_version.to_string()));
    map.insert(BUILD_DATE_KEY.to_string(), Value::String(format_build_date(built_at)));
    Self(map)
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// `DD/MM/YYYY HH:MM:SS` in IST.
pub fn format_build_date(at: DateTime<Utc>) -> String {
  match FixedOffset::east_opt(BUILD_DATE_OFFSET_SECS) {
    Some(offset) => at.with_timezone(&offset).format(BUILD_DATE_FORMAT).to_string(),
    None => at.format(BUILD_DATE_FORMAT).to_string(),
  }
}
