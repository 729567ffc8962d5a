//! Configuration loading from Lua scripts.
//!
//! Loads `init.lua` from the project root (found by walking up from the executable),
//! or from an explicit path given on the command line.

use crate::util::layout::{DEFAULT_FOLD_FACTOR, DEFAULT_MAX_FOLD_STEPS};
use mlua::{Lua, Result as LuaResult, Value};
use std::path::{Path, PathBuf};

/// Tab strip configuration
#[derive(Debug, Clone)]
pub struct TabsConfig {
    /// Unfolded tab width in pixels (already resolved from any unit string)
    pub tab_width: f32,
    pub fold_factor: f32,
    pub max_fold_steps: usize,
    pub tab_height: f32,
    pub font_size: f32,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            // 6rem at a 16px root font size
            tab_width: 96.0,
            fold_factor: DEFAULT_FOLD_FACTOR,
            max_fold_steps: DEFAULT_MAX_FOLD_STEPS,
            tab_height: 32.0,
            font_size: 13.0,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub tabs: TabsConfig,
    /// Root font size used to resolve `rem`/`em` lengths
    pub root_font_size: f32,
    /// Seconds between `[perf]` log lines; 0 disables them
    pub perf_log_interval: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: TabsConfig::default(),
            root_font_size: 16.0,
            perf_log_interval: 0.0,
        }
    }
}

/// Resolve a CSS-like length (`"6rem"`, `"1.5em"`, `"96px"`, `"96"`) to pixels.
pub fn resolve_length(value: &str, root_font_size: f32) -> Option<f32> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("rem") {
        (n, root_font_size)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, root_font_size)
    } else if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else {
        (value, 1.0)
    };

    let parsed: f32 = number.trim().parse().ok()?;
    let pixels = parsed * scale;
    (pixels.is_finite() && pixels > 0.0).then_some(pixels)
}

/// Find the project root by walking up from the executable location.
/// Looks for `Cargo.toml` or `init.lua` as markers.
fn find_project_root() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let mut current = exe_path.parent()?;

    // Walk up directory tree looking for project markers
    for _ in 0..10 {
        if current.join("Cargo.toml").exists() || current.join("init.lua").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }

    None
}

/// Load configuration from `path`, or from `init.lua` in the project root.
/// Returns default config if no config file exists or on any error.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(project_root) = find_project_root() else {
                log::debug!("Could not find project root, using default config");
                return Config::default();
            };
            project_root.join("init.lua")
        }
    };

    if !config_path.exists() {
        log::debug!("No config found at {}, using default config", config_path.display());
        return Config::default();
    }

    match load_config_from_file(&config_path) {
        Ok(config) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Err(e) => {
            log::error!("Failed to load config from {}: {}", config_path.display(), e);
            Config::default()
        }
    }
}

/// Load configuration from a specific Lua file.
fn load_config_from_file(path: &Path) -> LuaResult<Config> {
    let script = std::fs::read_to_string(path)
        .map_err(|e| mlua::Error::runtime(format!("Failed to read config file: {}", e)))?;
    load_config_from_str(&script)
}

/// Run a config script against a `config` table pre-populated with defaults.
fn load_config_from_str(script: &str) -> LuaResult<Config> {
    let lua = Lua::new();

    let tabs_defaults = TabsConfig::default();
    let config_defaults = Config::default();
    lua.load(format!(
        r#"
        config = {{
            tab_width = {tab_width},
            root_font_size = {root_font_size},
            fold_factor = {fold_factor},
            max_fold_steps = {max_fold_steps},
            tab_height = {tab_height},
            tab_font_size = {tab_font_size},
            perf_log_interval = {perf_log_interval},
        }}
        "#,
        tab_width = tabs_defaults.tab_width,
        root_font_size = config_defaults.root_font_size,
        fold_factor = tabs_defaults.fold_factor,
        max_fold_steps = tabs_defaults.max_fold_steps,
        tab_height = tabs_defaults.tab_height,
        tab_font_size = tabs_defaults.font_size,
        perf_log_interval = config_defaults.perf_log_interval,
    ))
    .exec()?;

    // Execute user script
    lua.load(script).exec()?;

    // Read values back from the table
    let globals = lua.globals();
    let config_table: mlua::Table = globals.get("config")?;

    let root_font_size: f32 = config_table.get("root_font_size")?;
    let tab_width = match config_table.get::<Value>("tab_width")? {
        Value::Integer(n) => n as f32,
        Value::Number(n) => n as f32,
        Value::String(s) => {
            let text = s.to_str()?.to_string();
            resolve_length(&text, root_font_size).ok_or_else(|| {
                mlua::Error::runtime(format!("Invalid tab_width length: {:?}", text))
            })?
        }
        other => {
            return Err(mlua::Error::runtime(format!(
                "tab_width must be a number or a length string, got {}",
                other.type_name()
            )))
        }
    };

    let config = Config {
        tabs: TabsConfig {
            tab_width,
            fold_factor: config_table.get("fold_factor")?,
            max_fold_steps: config_table.get("max_fold_steps")?,
            tab_height: config_table.get("tab_height")?,
            font_size: config_table.get("tab_font_size")?,
        },
        root_font_size,
        perf_log_interval: config_table.get("perf_log_interval")?,
    };

    Ok(config)
}
