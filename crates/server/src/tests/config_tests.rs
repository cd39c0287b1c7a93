use super::{apply_env, apply_file, Settings, MAX_TEMP_DATA_TTL_SECONDS};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_bind_to_localhost() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(settings.temp_data_ttl_seconds, 600);
    assert!(settings.bind_addr().is_ok());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
temp_data_ttl_seconds = 30
max_body_bytes = "1024"
"#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.temp_data_ttl_seconds, 30);
    assert_eq!(settings.max_body_bytes, 1024);
}

#[test]
fn env_overrides_file() {
    let mut settings = Settings::default();
    apply_file(&mut settings, r#"bind_addr = "0.0.0.0:9000""#);
    apply_env(
        &mut settings,
        env_from(&[("APP__BIND_ADDR", "127.0.0.1:7000"), ("RUST_LOG", "debug")]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7000");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_numbers_keep_previous_value() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__TEMP_DATA_TTL_SECONDS", "soon")]),
    );
    apply_file(&mut settings, r#"max_body_bytes = "big""#);
    assert_eq!(settings, Settings::default());
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "bind_addr = ");
    assert_eq!(settings, Settings::default());
}

#[test]
fn invalid_bind_address_is_reported() {
    let settings = Settings {
        server_bind: "not-an-address".into(),
        ..Settings::default()
    };
    let err = settings.bind_addr().expect_err("should fail");
    assert!(err.to_string().contains("not-an-address"));
}

#[test]
fn non_positive_ttl_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_from(&[("APP__TEMP_DATA_TTL_SECONDS", "0")]));
    apply_file(&mut settings, "temp_data_ttl_seconds = -5");
    assert_eq!(settings.temp_data_ttl_seconds, 600);
}

#[test]
fn oversized_ttl_is_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__TEMP_DATA_TTL_SECONDS", "1000000000000000")]),
    );
    apply_file(&mut settings, "temp_data_ttl_seconds = 9223372036854775807");
    assert_eq!(settings.temp_data_ttl_seconds, 600);

    apply_file(&mut settings, "temp_data_ttl_seconds = 604800");
    assert_eq!(settings.temp_data_ttl_seconds, MAX_TEMP_DATA_TTL_SECONDS);
}

#[test]
fn temp_data_ttl_rejects_values_set_directly() {
    let mut settings = Settings::default();
    assert_eq!(
        settings.temp_data_ttl().expect("ttl"),
        chrono::Duration::seconds(600)
    );

    settings.temp_data_ttl_seconds = 0;
    assert!(settings.temp_data_ttl().is_err());

    settings.temp_data_ttl_seconds = i64::MAX;
    let err = settings.temp_data_ttl().expect_err("should fail");
    assert!(err.to_string().contains("temp data ttl"));
}
