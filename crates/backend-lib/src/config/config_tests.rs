use super::*;
use figment::Jail;

#[test]
fn test_settings_validation() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());

    let mut invalid_settings = settings.clone();
    invalid_settings.log_level = "invalid".to_string();
    assert!(invalid_settings.validate().is_err());

    let mut invalid_settings = settings.clone();
    invalid_settings.hash_cost = 0;
    assert!(invalid_settings.validate().is_err());

    let mut invalid_settings = settings.clone();
    invalid_settings.hash_cost = MAX_HASH_COST + 1;
    assert!(invalid_settings.validate().is_err());

    let mut invalid_settings = settings.clone();
    invalid_settings.body_limit_bytes = 0;
    assert!(invalid_settings.validate().is_err());

    let mut invalid_settings = settings.clone();
    invalid_settings.cors_allow_origin = "http://bad\norigin".to_string();
    assert!(invalid_settings.validate().is_err());
}

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.port, 3000);
    assert_eq!(settings.hash_cost, scrypt::Params::RECOMMENDED_LOG_N);
    assert_eq!(settings.body_limit_bytes, 50 * 1024 * 1024);
    assert_eq!(settings.bind_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn test_load_settings() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "boxdepot.toml",
            r#"
            port = 8080
            database_url = "memory://"
            log_level = "debug"
            log_format = "json"
            "#,
        )?;

        // Environment variable takes precedence over the file
        jail.set_env("BOXDEPOT_LOG_LEVEL", "warn");
        jail.set_env("BOXDEPOT_PORT", "9090");

        let settings = Settings::load().map_err(|e| e.to_string())?;
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.hash_cost, DEFAULT_HASH_COST);
        Ok(())
    });
}

#[test]
fn test_bare_env_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "4000");
        jail.set_env("DATABASE_URL", "file://boxes-db");

        let settings = Settings::load_from("missing.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.port, 4000);
        assert_eq!(settings.database_url, "file://boxes-db");
        Ok(())
    });
}

#[test]
fn test_mongo_url_sets_database_url() {
    Jail::expect_with(|jail| {
        jail.set_env("MONGO_URL", "file://from-mongo-url");

        let settings = Settings::load_from("missing.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.database_url, "file://from-mongo-url");

        // DATABASE_URL wins when both are set
        jail.set_env("DATABASE_URL", "memory://");
        let settings = Settings::load_from("missing.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.database_url, "memory://");
        Ok(())
    });
}

#[test]
fn test_invalid_file_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("boxdepot.toml", "hash_cost = 42")?;
        assert!(Settings::load().is_err());
        Ok(())
    });
}
