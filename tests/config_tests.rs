use cashflow_core::{
    config::{AccountRole, Config, ConfigManager, CreditorConfig},
    errors::LedgerError,
};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path());
    assert_eq!(manager.load().unwrap(), Config::default());
}

#[test]
fn manager_does_not_touch_disk_until_save() {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().join("nested").join("cashflow_core");
    let manager = ConfigManager::with_base_dir(&base);
    assert_eq!(manager.load().unwrap(), Config::default());
    assert!(!base.exists());
}

#[test]
fn saved_config_loads_back() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().join("nested"));
    let config = Config {
        base_currency: "JPY".into(),
        creditors: CreditorConfig::new(["visa", "mortgage"]).with_trusted(["paypay-later"]),
    };
    manager.save(&config).unwrap();

    assert!(manager.path().exists());
    let loaded = manager.load().unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.creditors.role("paypay-later"), AccountRole::TrustedCreditor);
}

#[test]
fn invalid_config_is_not_saved() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::at_path(temp.path().join("config.json"));
    let mut config = Config::default();
    config.creditors.trusted_creditors.insert("loan".into());

    assert!(matches!(
        manager.save(&config),
        Err(LedgerError::InvalidConfig(_))
    ));
    assert!(!manager.path().exists());
}

#[test]
fn malformed_json_surfaces_serde_error() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let manager = ConfigManager::at_path(path);
    assert!(matches!(manager.load(), Err(LedgerError::Serde(_))));
}
