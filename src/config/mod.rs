/// Configuration system for codelens.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**, from [`schema::CodelensConfig::default()`]
/// 2. **User global config**, `~/.codelens/config.toml`
/// 3. **Project local config**, `.codelens.toml` in the current working directory
/// 4. **Environment variables**, `CODELENS_*` overrides (highest precedence)
///
/// Later layers override earlier ones at the key level: a project file that
/// only sets `display.theme` keeps the global file's `logging.path`.
///
/// # Usage
///
/// ```rust,ignore
/// use codelens::config;
///
/// let cfg = config::load();
/// if cfg.logging.enabled {
///     // ...
/// }
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::{CodelensConfig, OutputFormat};

use crate::interpret::Theme;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved codelens configuration.
///
/// Merges all layers in order: defaults, global TOML, project TOML, env vars.
pub fn load() -> CodelensConfig {
    let mut config = load_layers(
        global_config_path().as_deref(),
        project_config_path().as_deref(),
    );
    apply_env_overrides(&mut config);
    config
}

/// Merge the file layers on top of the defaults.
///
/// Missing or malformed files are skipped. A file whose merged result no
/// longer fits the schema (e.g. an unknown theme) is skipped as a whole.
pub fn load_layers(global: Option<&Path>, project: Option<&Path>) -> CodelensConfig {
    let mut merged = match toml::Value::try_from(CodelensConfig::default()) {
        Ok(value) => value,
        Err(_) => return CodelensConfig::default(),
    };

    for path in [global, project].into_iter().flatten() {
        let Some(layer) = load_toml_value(path) else {
            continue;
        };
        let mut candidate = merged.clone();
        merge_values(&mut candidate, layer);
        if candidate.clone().try_into::<CodelensConfig>().is_ok() {
            merged = candidate;
        }
    }

    merged.try_into().unwrap_or_default()
}

fn load_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Deep-merge `overlay` into `base`. Tables merge key by key; any other value
/// replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.codelens/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".codelens").join("config.toml"))
}

/// Path to the project local config: `.codelens.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".codelens.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `CODELENS_THEME`: `standard` or `hacker`
/// - `CODELENS_FORMAT`: `table` or `json`
/// - `CODELENS_LOGGING`: logging switch (`1`/`true`/`yes`/`on`)
/// - `CODELENS_LOG_PATH`: analysis log location
pub fn apply_env_overrides(config: &mut CodelensConfig) {
    if let Ok(val) = std::env::var("CODELENS_THEME")
        && let Some(theme) = parse_theme(&val)
    {
        config.display.theme = theme;
    }
    if let Ok(val) = std::env::var("CODELENS_FORMAT")
        && let Some(format) = parse_format(&val)
    {
        config.display.format = format;
    }
    if let Ok(val) = std::env::var("CODELENS_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("CODELENS_LOG_PATH")
        && !val.is_empty()
    {
        config.logging.path = val;
    }
}

/// Check if a string value represents a truthy boolean.
pub fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a theme name.
pub fn parse_theme(val: &str) -> Option<Theme> {
    match val.trim().to_ascii_lowercase().as_str() {
        "standard" | "default" => Some(Theme::Standard),
        "hacker" => Some(Theme::Hacker),
        _ => None,
    }
}

/// Parse an output format name.
pub fn parse_format(val: &str) -> Option<OutputFormat> {
    match val.trim().to_ascii_lowercase().as_str() {
        "table" | "text" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.codelens/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    write_default_config(&path, force)?;
    Ok(path)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, CodelensConfig::default_toml()).context("failed to write config file")
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `display.theme`. The updated file must still
/// deserialize, so `display.theme = neon` is rejected before anything is
/// written.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)
}

fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        let mut root = toml::Value::try_from(CodelensConfig::default())
            .context("failed to serialize defaults")?;
        let current: toml::Value =
            toml::from_str(&content).context("failed to parse config as TOML value")?;
        merge_values(&mut root, current);
        root
    } else {
        toml::Value::try_from(CodelensConfig::default())
            .context("failed to serialize default config")?
    };

    set_toml_value(&mut root, key, value)?;

    root.clone()
        .try_into::<CodelensConfig>()
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be `section.key`, got '{key}'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Array(_)) => {
            // Comma-separated list
            let items: Vec<toml::Value> = raw_value
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_ascii_lowercase()))
                .collect();
            toml::Value::Array(items)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::AnalysisOption;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("codelens-config-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn no_files_gives_defaults() {
        let config = load_layers(None, None);
        assert_eq!(config.display.theme, Theme::Standard);
        assert!(config.logging.enabled);
    }

    #[test]
    fn project_layer_overrides_global_per_key() {
        let dir = temp_dir("layers");
        let global = dir.join("config.toml");
        let project = dir.join(".codelens.toml");
        fs::write(
            &global,
            "[display]\ntheme = \"hacker\"\n[logging]\npath = \"/tmp/global.jsonl\"\n",
        )
        .unwrap();
        fs::write(&project, "[display]\nformat = \"json\"\n").unwrap();

        let config = load_layers(Some(&global), Some(&project));
        assert_eq!(config.display.theme, Theme::Hacker);
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.logging.path, "/tmp/global.jsonl");
    }

    #[test]
    fn malformed_layer_is_ignored() {
        let dir = temp_dir("malformed");
        let global = dir.join("config.toml");
        let project = dir.join(".codelens.toml");
        fs::write(&global, "[display]\ntheme = \"hacker\"\n").unwrap();
        fs::write(&project, "[display]\ntheme = \"neon\"\n").unwrap();

        let config = load_layers(Some(&global), Some(&project));
        assert_eq!(config.display.theme, Theme::Hacker);

        fs::write(&project, "this is = = not toml").unwrap();
        let config = load_layers(Some(&global), Some(&project));
        assert_eq!(config.display.theme, Theme::Hacker);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn parse_theme_and_format() {
        assert_eq!(parse_theme("Hacker"), Some(Theme::Hacker));
        assert_eq!(parse_theme("standard"), Some(Theme::Standard));
        assert_eq!(parse_theme("neon"), None);
        assert_eq!(parse_format("JSON"), Some(OutputFormat::Json));
        assert_eq!(parse_format("table"), Some(OutputFormat::Table));
        assert_eq!(parse_format("csv"), None);
    }

    #[test]
    fn set_toml_value_updates_string_and_bool() {
        let mut root = toml::Value::try_from(CodelensConfig::default()).unwrap();
        set_toml_value(&mut root, "display.theme", "hacker").unwrap();
        set_toml_value(&mut root, "logging.enabled", "off").unwrap();

        let config: CodelensConfig = root.try_into().unwrap();
        assert_eq!(config.display.theme, Theme::Hacker);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn set_toml_value_updates_list() {
        let mut root = toml::Value::try_from(CodelensConfig::default()).unwrap();
        set_toml_value(&mut root, "request.options", "Complexity, refactoring").unwrap();

        let config: CodelensConfig = root.try_into().unwrap();
        assert_eq!(
            config.request.options,
            vec![AnalysisOption::Complexity, AnalysisOption::Refactoring]
        );
    }

    #[test]
    fn set_toml_value_rejects_unknown_keys() {
        let mut root = toml::Value::try_from(CodelensConfig::default()).unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "value").is_err());
        assert!(set_toml_value(&mut root, "display.colour", "red").is_err());
        assert!(set_toml_value(&mut root, "theme", "hacker").is_err());
    }

    #[test]
    fn set_config_value_writes_and_validates() {
        let dir = temp_dir("set");
        let path = dir.join("config.toml");

        set_config_value_at(&path, "display.theme", "hacker").unwrap();
        assert!(set_config_value_at(&path, "display.theme", "neon").is_err());

        let config = load_layers(Some(&path), None);
        assert_eq!(config.display.theme, Theme::Hacker);
    }

    #[test]
    fn write_default_config_refuses_overwrite_without_force() {
        let dir = temp_dir("init");
        let path = dir.join("config.toml");

        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());

        let config = load_layers(Some(&path), None);
        assert_eq!(config.request.language, "python");
    }
}
