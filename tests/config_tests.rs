//! Configuration parsing and defaults.

use mjt::api::{ApiCredential, PlanTier};
use mjt::infrastructure::config::Config;

#[test]
fn defaults_are_sensible() {
    let config = Config::default();

    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "WARN");
    assert!(config.logging.path.is_none());

    assert!(config.deepl.api_key.is_none());
    assert_eq!(config.deepl.target_lang, "DE");
    assert!(config.deepl.formality.is_none());

    assert!(config.mjml.cli_path.is_none());
    assert!(config.mjml.tmp_path.is_none());
}

#[test]
fn full_config_parses() {
    let toml_content = r#"
[logging]
enable = true
path = "/tmp/mjt.log"
level = "DEBUG"

[deepl]
api_key = "abc123:fx"
target_lang = "FR"
formality = "more"

[mjml]
cli_path = "/opt/mjml/bin/mjml"
tmp_path = "/var/tmp"
"#;

    let config: Config = toml::from_str(toml_content).unwrap();
    assert_eq!(config.logging.level, "DEBUG");
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/mjt.log"));
    assert_eq!(config.deepl.api_key.as_deref(), Some("abc123:fx"));
    assert_eq!(config.deepl.target_lang, "FR");
    assert_eq!(config.deepl.formality.as_deref(), Some("more"));
    assert_eq!(config.mjml.cli_path.as_deref(), Some("/opt/mjml/bin/mjml"));
    assert_eq!(config.mjml.tmp_path.as_deref(), Some("/var/tmp"));
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let toml_content = r#"
[deepl]
api_key = "k"
"#;

    let config: Config = toml::from_str(toml_content).unwrap();
    assert_eq!(config.deepl.api_key.as_deref(), Some("k"));
    assert_eq!(config.deepl.target_lang, "DE");
    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn plan_is_guessed_from_the_key_suffix() {
    let free = ApiCredential::new("abc123:fx").unwrap();
    assert_eq!(free.plan_hint(), PlanTier::Free);

    let pro = ApiCredential::new("abc123").unwrap();
    assert_eq!(pro.plan_hint(), PlanTier::Pro);

    // The marker only counts as a suffix
    let pro = ApiCredential::new("abc:fx123").unwrap();
    assert_eq!(pro.plan_hint(), PlanTier::Pro);

    assert!(ApiCredential::new("").is_none());
}

#[test]
fn credentials_never_debug_print_the_key() {
    let credential = ApiCredential::new("super-secret-key:fx").unwrap();
    let debugged = format!("{:?}", credential);
    assert!(!debugged.contains("super-secret-key"));
    assert!(debugged.contains("redacted"));
}
