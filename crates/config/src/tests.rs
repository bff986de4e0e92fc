use crate::{AppConfig, ConfigOverrides, ServerConfig};
use figment::Jail;
use std::path::{Path, PathBuf};

#[test]
fn test_bind_addr() {
    let server = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
    };
    assert_eq!(server.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn test_overrides_only() {
    Jail::expect_with(|_jail| {
        let overrides = ConfigOverrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(3000),
            cache_dir: Some(PathBuf::from("cache")),
            log_level: None,
        };

        let config = AppConfig::load(".", &overrides).map_err(|e| e.to_string())?;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.cache_dir, PathBuf::from("cache"));
        assert_eq!(config.storage.static_dir, PathBuf::from("static"));
        assert_eq!(config.storage.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.app_env, "development");
        assert!(!config.wants_json_logs());
        Ok(())
    });
}

#[test]
fn test_missing_required_fields_fail() {
    Jail::expect_with(|_jail| {
        let overrides = ConfigOverrides {
            host: Some("localhost".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::load(Path::new("."), &overrides).is_err());
        Ok(())
    });
}
