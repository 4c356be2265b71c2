use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};
use tracing::info;

use super::Settings;

/// The Rhai scripting engine for configuration
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self { engine, settings }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_prompt", move |prompt: &str| {
                if let Ok(mut settings) = s.write() {
                    settings.prompt = prompt.to_string();
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_history_size", move |size: i64| {
                if let Ok(mut settings) = s.write() {
                    let (lo, hi) = Settings::HISTORY_SIZE_RANGE;
                    settings.history_size = clamp_to(size, lo, hi);
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_line_capacity", move |capacity: i64| {
                if let Ok(mut settings) = s.write() {
                    let (lo, hi) = Settings::LINE_CAPACITY_RANGE;
                    settings.line_capacity = clamp_to(capacity, lo, hi);
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_banner", move |enabled: bool| {
                if let Ok(mut settings) = s.write() {
                    settings.banner = enabled;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_max_operations", move |ops: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.max_operations = u64::try_from(ops).unwrap_or(0);
                }
            });
        }

        // Config files have no console to print to
        engine.on_print(|_| {});

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        self.eval(&content)?;
        info!(path = %path.display(), "config loaded");
        Ok(())
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| format!("Config parse error: {}", e))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| format!("Config error: {}", e))
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rill"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), String> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_to(value: i64, lo: usize, hi: usize) -> usize {
    usize::try_from(value).unwrap_or(0).clamp(lo, hi)
}
