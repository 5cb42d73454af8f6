use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{LedgerError, Result};

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "cashflow_core";
const TMP_SUFFIX: &str = "tmp";

/// Account roles used by the aggregation engine.
///
/// Accounts absent from `creditors` are cash accounts. `trusted_creditors`
/// only changes how debt buckets are labelled, never the arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditorConfig {
    #[serde(default)]
    pub creditors: BTreeSet<String>,
    #[serde(default)]
    pub trusted_creditors: BTreeSet<String>,
}

impl CreditorConfig {
    pub fn new<I, S>(creditors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            creditors: creditors.into_iter().map(Into::into).collect(),
            trusted_creditors: BTreeSet::new(),
        }
    }

    /// Marks creditors as trusted, registering them as creditors as well.
    pub fn with_trusted<I, S>(mut self, trusted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for account in trusted {
            let account = account.into();
            self.creditors.insert(account.clone());
            self.trusted_creditors.insert(account);
        }
        self
    }

    pub fn is_creditor(&self, account: &str) -> bool {
        !account.is_empty() && self.creditors.contains(account)
    }

    pub fn is_trusted(&self, account: &str) -> bool {
        self.is_creditor(account) && self.trusted_creditors.contains(account)
    }

    pub fn role(&self, account: &str) -> AccountRole {
        if self.is_trusted(account) {
            AccountRole::TrustedCreditor
        } else if self.is_creditor(account) {
            AccountRole::Creditor
        } else {
            AccountRole::Cash
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountRole {
    Cash,
    Creditor,
    TrustedCreditor,
}

impl AccountRole {
    pub fn label(self) -> &'static str {
        match self {
            AccountRole::Cash => "cash",
            AccountRole::Creditor => "creditor",
            AccountRole::TrustedCreditor => "trusted creditor",
        }
    }
}

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Currency every transaction rate is expressed against. Informational.
    #[serde(default = "Config::default_base_currency")]
    pub base_currency: String,
    #[serde(flatten)]
    pub creditors: CreditorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: Self::default_base_currency(),
            creditors: CreditorConfig::default(),
        }
    }
}

impl Config {
    pub fn default_base_currency() -> String {
        "USD".into()
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_currency.trim().is_empty() {
            return Err(LedgerError::InvalidConfig(
                "base currency must not be empty".into(),
            ));
        }
        if let Some(account) = self
            .creditors
            .trusted_creditors
            .iter()
            .find(|account| !self.creditors.creditors.contains(*account))
        {
            return Err(LedgerError::InvalidConfig(format!(
                "trusted creditor `{account}` is not listed as a creditor"
            )));
        }
        Ok(())
    }
}

/// Loads and stores [`Config`] as JSON inside a base directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory, falling back to the working directory.
    /// Nothing is created until [`ConfigManager::save`].
    pub fn new() -> Self {
        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: base.as_ref().join(CONFIG_FILE),
        }
    }

    /// Points at an explicit config file; its directory is created on save.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        info!(
            path = %self.path.display(),
            creditors = config.creditors.creditors.len(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
