//! Config command implementation.
//!
//! View and initialize configuration settings.
//! Config file is located at ~/.config/clings/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CLINGS_CONFIG";

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# clings configuration

# Config schema version (do not modify)
version = 1

# Output preferences
[output]
# color = true   # Enable colors (respects NO_COLOR env)
# json = false   # Always print JSON

# Search defaults
[search]
# limit = 50     # Maximum todos shown, 0 for no limit

# Todo input
[input]
# path = "/path/to/todos.json"   # Used when --input is not given
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            output: OutputConfig::default(),
            search: SearchConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Print JSON without needing `--json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

/// Search configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default result limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Input configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Default todo file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/clings/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("clings"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("clings"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    tracing::debug!(path = %path.display(), version = config.version, "loaded config");
    migrate_config(config)
}

/// Brings an older config up to the current version.
///
/// Files written by a newer clings are refused rather than half-read.
fn migrate_config(mut config: Config) -> Result<Config> {
    match config.version {
        CONFIG_VERSION => Ok(config),
        // Version 0 predates the version key; its schema is identical.
        0 => {
            config.version = CONFIG_VERSION;
            Ok(config)
        }
        newer => Err(CommandError::Config(format!(
            "config version {} is newer than supported version {}",
            newer, CONFIG_VERSION
        ))),
    }
}

/// Writes the default config file if none exists.
///
/// Returns `true` when a file was created.
fn init_config() -> Result<bool> {
    let path = get_config_path()?;
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(true)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
            if let Some(json) = config.output.json {
                println!("  json: {}", json);
            }

            println!("\n[search]");
            if let Some(limit) = config.search.limit {
                println!("  limit: {}", limit);
            }

            println!("\n[input]");
            if let Some(ref input) = config.input.path {
                println!("  path: {}", input.display());
            }
        } else {
            println!("(No config file exists. Run 'clings config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext) -> Result<()> {
    let created = init_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "created": created,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if created {
            println!("Created {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Points `CLINGS_CONFIG` at `path` for the duration of `f`.
    fn with_config_env<T>(path: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original = env::var(CONFIG_ENV).ok();
        env::set_var(CONFIG_ENV, path);
        let result = f();
        match original {
            Some(val) => env::set_var(CONFIG_ENV, val),
            None => env::remove_var(CONFIG_ENV),
        }
        result
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.output.color.is_none());
        assert!(config.output.json.is_none());
        assert!(config.search.limit.is_none());
        assert!(config.input.path.is_none());
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, 1);
        assert!(config.search.limit.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1

[output]
color = false
json = true

[search]
limit = 10

[input]
path = "/tmp/todos.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.output.json, Some(true));
        assert_eq!(config.search.limit, Some(10));
        assert_eq!(config.input.path, Some(PathBuf::from("/tmp/todos.json")));
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.output.color.is_none());
    }

    #[test]
    fn test_config_serialization_skips_unset() {
        let mut config = Config::default();
        config.search.limit = Some(5);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("limit = 5"));
        assert!(!toml_str.contains("color"));
    }

    #[test]
    fn test_migrate_config_from_unversioned() {
        let mut config = Config {
            version: 0,
            ..Config::default()
        };
        config.search.limit = Some(7);
        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.search.limit, Some(7));
    }

    #[test]
    fn test_migrate_config_current_is_unchanged() {
        let mut config = Config::default();
        config.output.json = Some(true);
        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.output.json, Some(true));
    }

    #[test]
    fn test_migrate_config_rejects_future_version() {
        let config: Config = toml::from_str("version = 999\n").unwrap();
        assert_eq!(config.version, 999);
        let err = migrate_config(config).unwrap_err();
        assert!(matches!(err, CommandError::Config(ref msg) if msg.contains("999")));
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        let path = with_config_env(&config_path, get_config_path).unwrap();
        assert_eq!(path, config_path);
    }

    #[test]
    #[serial]
    fn test_load_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing.toml");
        let config = with_config_env(&config_path, load_config).unwrap();
        assert!(config.search.limit.is_none());
    }

    #[test]
    #[serial]
    fn test_load_invalid_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[search]\nlimit = \"lots\"\n").unwrap();
        let result = with_config_env(&config_path, load_config);
        assert!(matches!(result, Err(CommandError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_init_config_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let first = with_config_env(&config_path, init_config).unwrap();
        let second = with_config_env(&config_path, init_config).unwrap();

        assert!(first);
        assert!(!second);
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("version = 1"));
    }
}
