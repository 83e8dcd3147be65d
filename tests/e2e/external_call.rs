//! Config-driven adapter calls with encrypted payload fields.

use fleen_base::adapters::Method;
use fleen_base::config::load_base_config_from_sources;
use fleen_base::{BaseAdapter, BaseEnv, FieldCipher};
use serde_json::{Value, json};
use std::error::Error;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn encrypted_field_round_trips_through_remote() -> Result<(), Box<dyn Error>> {
    let server = MockServer::start().await;
    let overrides = json!({
        "http": {"baseUrl": server.uri(), "timeoutMs": 2000},
        "security": {"fieldEncryptionKey": "shared-secret"}
    })
    .to_string();
    let config = load_base_config_from_sources(None, Some(overrides.as_str()), &BaseEnv::default())?;

    let cipher = FieldCipher::from_config(&config.security)?;
    let adapter = BaseAdapter::from_config(&config.http)?;
    let sealed = cipher.encrypt("+233201234567")?;

    Mock::given(method("POST"))
        .and(path("/members/42"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(json!({"phone": sealed})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"phone": sealed})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = adapter.build_uri(&[&"/members", &BaseAdapter::path_var(42)])?;
    let body = json!({"phone": sealed});
    let reply: Value = adapter
        .do_call_json(
            &uri,
            Method::POST,
            Some(&BaseAdapter::auth_header_with_bearer_token("abc")),
            Some(&body),
        )
        .await?;

    let returned = reply["phone"].as_str().unwrap_or_default();
    assert_eq!(cipher.decrypt(returned)?, "+233201234567");
    Ok(())
}

#[test]
fn adapter_requires_a_base_url() -> Result<(), Box<dyn Error>> {
    let config = load_base_config_from_sources(None, None, &BaseEnv::default())?;
    assert!(BaseAdapter::from_config(&config.http).is_err());
    Ok(())
}
