//! Configuration loader
//!
//! Loads node configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If no credentials are set there, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PICNIC_AUTH_KEY`: Explicit session token
//! - `PICNIC_USER_ID`: Account e-mail used for login
//! - `PICNIC_PASSWORD`: Account password used for login
//! - `PICNIC_COUNTRY_CODE`: Deployment country (`NL`, `DE`, `FR`; default `NL`)
//! - `PICNIC_API_VERSION`: Storefront API version (default `15`)
//! - `PICNIC_CONTINUE_ON_FAIL`: Record item errors instead of aborting
//! - `PICNIC_BASE_URL`: Override for the storefront URL
//!
//! At least one of `PICNIC_AUTH_KEY` or `PICNIC_USER_ID` must be set for the
//! environment to count as configured.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./picnic.json` or `./picnic.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../picnic.json` or `../picnic.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use picnic_domain::constants::{DEFAULT_API_VERSION, DEFAULT_COUNTRY_CODE};
use picnic_domain::{CountryCode, NodeConfig, PicnicCredentials, PicnicError, Result};

const ENV_AUTH_KEY: &str = "PICNIC_AUTH_KEY";
const ENV_USER_ID: &str = "PICNIC_USER_ID";
const ENV_PASSWORD: &str = "PICNIC_PASSWORD";
const ENV_COUNTRY_CODE: &str = "PICNIC_COUNTRY_CODE";
const ENV_API_VERSION: &str = "PICNIC_API_VERSION";
const ENV_CONTINUE_ON_FAIL: &str = "PICNIC_CONTINUE_ON_FAIL";
const ENV_BASE_URL: &str = "PICNIC_BASE_URL";

const CONFIG_FILE_NAMES: [&str; 4] = ["picnic.json", "picnic.toml", "config.json", "config.toml"];

#[cfg(test)]
pub(crate) static ENV_LOCK: once_cell::sync::Lazy<std::sync::Mutex<()>> =
    once_cell::sync::Lazy::new(|| std::sync::Mutex::new(()));

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If no credentials are
/// configured there, falls back to loading from a config file.
///
/// # Errors
/// Returns `PicnicError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<NodeConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!(source = "env", "config_loaded");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "config_env_incomplete_trying_file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PicnicError::Config` if neither `PICNIC_AUTH_KEY` nor
/// `PICNIC_USER_ID` is set, or the country code is not supported.
pub fn load_from_env() -> Result<NodeConfig> {
    let auth_key = env_opt(ENV_AUTH_KEY);
    let user_id = env_opt(ENV_USER_ID);

    if auth_key.is_none() && user_id.is_none() {
        return Err(PicnicError::Config(format!(
            "Missing required environment variable: {ENV_AUTH_KEY} or {ENV_USER_ID}"
        )));
    }

    let country_code = env_opt(ENV_COUNTRY_CODE)
        .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string())
        .parse::<CountryCode>()
        .map_err(|e| PicnicError::Config(format!("Invalid country code: {e}")))?;
    let api_version = env_opt(ENV_API_VERSION).unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    Ok(NodeConfig {
        credentials: PicnicCredentials {
            country_code,
            api_version,
            auth_key,
            user_id,
            password: std::env::var(ENV_PASSWORD).ok(),
        },
        continue_on_fail: env_bool(ENV_CONTINUE_ON_FAIL, false),
        base_url: env_opt(ENV_BASE_URL),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PicnicError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<NodeConfig> {
    let config_path = match path {
        Some(p) if !p.exists() => {
            return Err(PicnicError::Config(format!("Config file not found: {}", p.display())));
        }
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            PicnicError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "config_loading_from_file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PicnicError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<NodeConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PicnicError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PicnicError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PicnicError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Checks the working directory, its parent and the executable's directory
/// for `picnic.{json,toml}` and `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Trimmed environment variable, `None` when unset or blank.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const ALL_VARS: [&str; 7] = [
        ENV_AUTH_KEY,
        ENV_USER_ID,
        ENV_PASSWORD,
        ENV_COUNTRY_CODE,
        ENV_API_VERSION,
        ENV_CONTINUE_ON_FAIL,
        ENV_BASE_URL,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let path = file.path().with_extension(extension);
        std::fs::copy(file.path(), &path).unwrap();
        (file, path)
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (value, expected) in
            [("1", true), ("TRUE", true), (" yes ", true), ("on", true), ("0", false), ("off", false)]
        {
            std::env::set_var("PICNIC_TEST_BOOL", value);
            assert_eq!(env_bool("PICNIC_TEST_BOOL", !expected), expected, "value {value:?}");
        }

        std::env::remove_var("PICNIC_TEST_BOOL");
        assert!(env_bool("PICNIC_TEST_BOOL", true));
        assert!(!env_bool("PICNIC_TEST_BOOL", false));
    }

    #[test]
    fn test_load_from_env_login_credentials() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_USER_ID, " john@example.com ");
        std::env::set_var(ENV_PASSWORD, "topsecret");
        std::env::set_var(ENV_COUNTRY_CODE, "de");
        std::env::set_var(ENV_CONTINUE_ON_FAIL, "true");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.credentials.country_code, CountryCode::De);
        assert_eq!(config.credentials.api_version(), "15");
        assert_eq!(config.credentials.user_id(), "john@example.com");
        assert_eq!(config.credentials.password(), "topsecret");
        assert_eq!(config.credentials.configured_auth_key(), None);
        assert!(config.continue_on_fail);
        assert_eq!(config.base_url, None);

        clear_env();
    }

    #[test]
    fn test_load_from_env_auth_key_only() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_AUTH_KEY, "token");
        std::env::set_var(ENV_API_VERSION, "16");
        std::env::set_var(ENV_BASE_URL, "http://localhost:8080/api/16");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.credentials.configured_auth_key(), Some("token"));
        assert_eq!(config.credentials.api_version(), "16");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/api/16"));
        assert!(!config.continue_on_fail);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_credentials() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_AUTH_KEY, "   ");
        let err = load_from_env().unwrap_err();
        assert!(matches!(err, PicnicError::Config(_)), "Should be a Config error");

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_country() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_AUTH_KEY, "token");
        std::env::set_var(ENV_COUNTRY_CODE, "BE");
        let err = load_from_env().unwrap_err();
        assert!(err.to_string().contains("Invalid country code"));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let (_file, path) = write_temp(
            r#"{
                "credentials": {"countryCode": "FR", "userId": "jane@example.com", "password": "pw"},
                "continueOnFail": true
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON file");
        assert_eq!(config.credentials.country_code, CountryCode::Fr);
        assert!(config.credentials.has_login_pair());
        assert!(config.continue_on_fail);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let (_file, path) = write_temp(
            r#"
baseUrl = "http://localhost:9000/api/15"

[credentials]
authKey = "token"
apiVersion = "15"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML file");
        assert_eq!(config.credentials.configured_auth_key(), Some("token"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000/api/15"));
        assert!(!config.continue_on_fail);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/picnic.json"))).unwrap_err();
        assert!(matches!(err, PicnicError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let (_file, path) = write_temp(r#"{ "credentials": "#, "json");

        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON format"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("credentials: {}", Path::new("picnic.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
