use malikay::config::AppConfig;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.brand, "Malikay");
    assert_eq!(config.secret, "1234");
    assert_eq!(config.default_timer_minutes, 3);
    assert_eq!(config.export_dir, PathBuf::from("."));
}

#[test]
fn test_from_toml_overrides() {
    let config = AppConfig::from_toml(
        r#"
brand = "Clinic"
secret = "s3cret"
default_timer_minutes = 5
export_dir = "/tmp/records"
"#,
    )
    .expect("Valid config");

    assert_eq!(config.brand, "Clinic");
    assert_eq!(config.secret, "s3cret");
    assert_eq!(config.default_timer_minutes, 5);
    assert_eq!(config.export_dir, PathBuf::from("/tmp/records"));
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AppConfig::from_toml("brand = \"Clinic\"\n").unwrap();
    assert_eq!(config.brand, "Clinic");
    assert_eq!(config.secret, "1234");
    assert_eq!(config.default_timer_minutes, 3);
}

#[test]
fn test_out_of_range_timer_default_falls_back() {
    let config = AppConfig::from_toml("default_timer_minutes = 45\n").unwrap();
    assert_eq!(config.default_timer_minutes, 3);

    let config = AppConfig::from_toml("default_timer_minutes = 0\n").unwrap();
    assert_eq!(config.default_timer_minutes, 3);
}

#[test]
fn test_unknown_keys_rejected() {
    assert!(AppConfig::from_toml("colour = \"green\"\n").is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "brand = \"FromFile\"").unwrap();

    let config = AppConfig::load(Some(file.path()));
    assert_eq!(config.brand, "FromFile");
}

#[test]
fn test_load_invalid_or_missing_file_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is not toml = = =").unwrap();
    assert_eq!(AppConfig::load(Some(file.path())).brand, "Malikay");

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert_eq!(AppConfig::load(Some(missing.as_path())).brand, "Malikay");
}
