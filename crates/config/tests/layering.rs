use figment::Jail;
use inventory_config::{AppConfig, ConfigOverrides};
use std::path::PathBuf;

#[test]
fn test_file_env_and_cli_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
                app_name = "stockroom"

                [server]
                host = "127.0.0.1"
                port = 8000

                [storage]
                cache_dir = "/tmp/from-file"
                static_dir = "forms"

                [telemetry]
                log_level = "debug"
            "#,
        )?;
        jail.set_env("INVENTORY_SERVER__PORT", "9000");

        let overrides = ConfigOverrides {
            cache_dir: Some(PathBuf::from("/tmp/from-cli")),
            ..Default::default()
        };
        let config = AppConfig::load(".", &overrides).map_err(|e| e.to_string())?;

        assert_eq!(config.app_name, "stockroom");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.cache_dir, PathBuf::from("/tmp/from-cli"));
        assert_eq!(config.storage.static_dir, PathBuf::from("forms"));
        assert_eq!(config.telemetry.log_level, "debug");
        Ok(())
    });
}

#[test]
fn test_app_env_selects_profile_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
                [server]
                host = "127.0.0.1"
                port = 8000

                [storage]
                cache_dir = "cache"
            "#,
        )?;
        jail.create_file(
            "production.toml",
            r#"
                [server]
                host = "0.0.0.0"
            "#,
        )?;
        jail.set_env("APP_ENV", "production");

        let config = AppConfig::load(".", &ConfigOverrides::default()).map_err(|e| e.to_string())?;

        assert_eq!(config.app_env, "production");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.is_production());
        assert!(config.wants_json_logs());
        Ok(())
    });
}
