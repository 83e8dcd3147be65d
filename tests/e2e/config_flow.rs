//! Effective config assembled from file, overrides and env.

use fleen_base::load_effective_config_json;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../config/tests/fixtures")
        .join(name)
}

#[test]
fn file_overrides_and_env_merge_in_order() -> Result<(), Box<dyn Error>> {
    let env = BTreeMap::from([("FLEEN_LOG_LEVEL".to_string(), "trace".to_string())]);
    let json = load_effective_config_json(
        &env,
        Some(&fixture("base-config.valid.toml")),
        Some(r#"{"paging":{"defaultPageSize":12}}"#),
    )?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value["paging"]["defaultPageSize"], 12);
    assert_eq!(value["paging"]["defaultSortBy"], "title");
    assert_eq!(value["http"]["timeoutMs"], 5000);
    assert_eq!(value["logging"]["level"], "trace");
    Ok(())
}

#[test]
fn secrets_never_reach_the_output() -> Result<(), Box<dyn Error>> {
    let json =
        load_effective_config_json(&BTreeMap::new(), Some(&fixture("base-config.valid.json")), None)?;
    assert!(!json.contains("correct-horse-battery-staple"));
    assert!(json.contains("[REDACTED]"));
    Ok(())
}

#[test]
fn bad_env_values_are_reported() {
    let env = BTreeMap::from([(
        "FLEEN_PAGING_DEFAULT_PAGE_SIZE".to_string(),
        "lots".to_string(),
    )]);
    let Err(error) = load_effective_config_json(&env, None, None) else {
        panic!("garbage page size accepted");
    };
    assert_eq!(error.code.namespace(), "config");
}
