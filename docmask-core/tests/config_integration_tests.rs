// docmask-core/tests/config_integration_tests.rs
use anyhow::Result;
use tempfile::NamedTempFile;
use std::io::Write;

use docmask_core::config::{self, RedactionConfig, RedactionRule};
use docmask_core::{ExemptPolicy, RuleRegistry};

fn write_yaml(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_rules() {
    let config = RedactionConfig::load_default_rules().unwrap();
    let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["rrn", "fgn", "email", "phone_mobile", "phone_city", "card", "passport", "driver_license"]
    );
    let passport = config.rules.iter().find(|r| r.name == "passport").unwrap();
    assert!(passport.validator.is_none());
    assert!(config.validation.rrn_checksum);
    assert_eq!(config.masking.mask_char(), '*');
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_yaml(
        r##"
rules:
  - name: employee_id
    pattern: 'EMP-\d{6}'
    description: "Internal employee number"
validation:
  card_luhn: false
masking:
  mask: "#"
  exempt: dashes_and_whitespace
"##,
    )?;
    let config = RedactionConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].name, "employee_id");
    assert_eq!(config.rules[0].pattern, Some(r"EMP-\d{6}".to_string()));
    assert!(!config.validation.card_luhn);
    assert!(config.validation.card_iin);
    assert_eq!(config.masking.mask_char(), '#');
    assert_eq!(config.masking.exempt, Some(ExemptPolicy::DashesAndWhitespace));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_rules() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: dup
    pattern: 'a'
  - name: dup
    pattern: '(b'
  - name: nopattern
"#,
    )?;
    let err = RedactionConfig::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Duplicate rule name found: 'dup'"));
    assert!(message.contains("invalid regex pattern"));
    assert!(message.contains("missing the `pattern` field"));
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    assert!(RedactionConfig::load_from_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = RedactionConfig::load_default_rules().unwrap();
    let merged = config::merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_rules_override_and_add() {
    let default_config = RedactionConfig::load_default_rules().unwrap();
    let user_config = RedactionConfig {
        rules: vec![
            RedactionRule {
                name: "email".to_string(),
                pattern: Some(r"[a-z]+@corp\.example".to_string()),
                ..Default::default()
            },
            RedactionRule {
                name: "employee_id".to_string(),
                pattern: Some(r"EMP-\d{6}".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let merged = config::merge_rules(default_config.clone(), Some(user_config));
    assert_eq!(merged.rules.len(), default_config.rules.len() + 1);

    let email = merged.rules.iter().find(|r| r.name == "email").unwrap();
    assert_eq!(email.pattern.as_deref(), Some(r"[a-z]+@corp\.example"));
    assert!(email.validator.is_none());
    assert_eq!(merged.rules.last().unwrap().name, "employee_id");
}

#[test]
fn test_set_active_rules_enable_opt_in_and_disable() {
    let mut config = RedactionConfig::load_default_rules().unwrap();
    config.rules.push(RedactionRule {
        name: "employee_id".into(),
        pattern: Some(r"EMP-\d{6}".into()),
        opt_in: true,
        ..Default::default()
    });
    config.set_active_rules(&["employee_id".to_string()], &["passport".to_string(), "nope".to_string()]);
    assert!(config.rules.iter().any(|r| r.name == "employee_id"));
    assert!(!config.rules.iter().any(|r| r.name == "passport"));
}

#[test]
fn test_registry_compiles_merged_config() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: employee_id
    pattern: 'EMP-\d{6}'
"#,
    )?;
    let user = RedactionConfig::load_from_file(file.path())?;
    let merged = config::merge_rules(RedactionConfig::load_default_rules()?, Some(user));
    let registry = RuleRegistry::from_config(&merged)?;
    assert!(registry.get("employee_id").is_some());
    assert!(registry.get("rrn").is_some());
    Ok(())
}
