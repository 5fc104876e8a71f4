use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Key of the fallback record for clients/symbols without an explicit entry.
pub const DEFAULT_KEY: &str = "DEFAULT";

/// Per-user trading limits, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub user_id: String,
    pub max_position_size: f64,
    pub max_daily_volume: f64,
    pub available_balance: f64,
    pub margin_requirement: f64,
    pub is_active: bool,
}

/// Per-symbol trading parameters, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    pub min_quantity: f64,
    pub max_quantity: f64,
    pub tick_size: f64,
    pub margin_rate: f64,
    pub is_tradeable: bool,
    pub max_order_value: f64,
}

#[derive(Debug, Deserialize)]
struct UserConfigFile {
    users: Vec<UserConfig>,
}

#[derive(Debug, Deserialize)]
struct SymbolConfigFile {
    symbols: Vec<SymbolConfig>,
}

/// Keyed user-config map. Lookups resolve to the explicit entry or the
/// DEFAULT record; callers treat a miss on both as a rejection.
pub struct UserConfigs {
    inner: Mutex<HashMap<String, UserConfig>>,
}

impl UserConfigs {
    pub fn new(records: Vec<UserConfig>) -> Self {
        let inner = records
            .into_iter()
            .map(|config| (config.user_id.clone(), config))
            .collect();
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn resolve(&self, user_id: &str) -> Option<UserConfig> {
        let inner = self.inner.lock().unwrap();
        inner
            .get(user_id)
            .or_else(|| inner.get(DEFAULT_KEY))
            .cloned()
    }

    pub fn update(&self, config: UserConfig) {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(config.user_id.clone(), config);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

/// Keyed symbol-config map with the same resolution rule as `UserConfigs`.
pub struct SymbolConfigs {
    inner: Mutex<HashMap<String, SymbolConfig>>,
}

impl SymbolConfigs {
    pub fn new(records: Vec<SymbolConfig>) -> Self {
        let inner = records
            .into_iter()
            .map(|config| (config.symbol.clone(), config))
            .collect();
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn resolve(&self, symbol: &str) -> Option<SymbolConfig> {
        let inner = self.inner.lock().unwrap();
        inner
            .get(symbol)
            .or_else(|| inner.get(DEFAULT_KEY))
            .cloned()
    }

    pub fn update(&self, config: SymbolConfig) {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(config.symbol.clone(), config);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

/// Loads the user configuration document. Any read or shape error is fatal
/// for startup; the caller aborts initialization.
pub fn load_user_configs(path: &Path) -> Result<UserConfigs> {
    let document: UserConfigFile = Config::builder()
        .add_source(File::from(path).format(FileFormat::Json))
        .build()
        .with_context(|| format!("cannot open user config file: {}", path.display()))?
        .try_deserialize()
        .with_context(|| format!("malformed user config file: {}", path.display()))?;

    info!("Loaded {} user configurations", document.users.len());
    Ok(UserConfigs::new(document.users))
}

/// Loads the symbol configuration document; fatal on error, like
/// `load_user_configs`.
pub fn load_symbol_configs(path: &Path) -> Result<SymbolConfigs> {
    let document: SymbolConfigFile = Config::builder()
        .add_source(File::from(path).format(FileFormat::Json))
        .build()
        .with_context(|| format!("cannot open symbol config file: {}", path.display()))?
        .try_deserialize()
        .with_context(|| format!("malformed symbol config file: {}", path.display()))?;

    info!("Loaded {} symbol configurations", document.symbols.len());
    Ok(SymbolConfigs::new(document.symbols))
}
