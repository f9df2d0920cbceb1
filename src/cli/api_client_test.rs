use crate::cli::api_client::*;
use serial_test::serial;

// Initialize crypto provider once for all tests
fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[test]
fn test_explicit_url_is_used() {
    init_crypto();
    let client = ApiClient::new(Some("http://explicit:7777".to_string()), None);
    assert_eq!(client.base_url(), "http://explicit:7777");
}

#[test]
fn test_trailing_slash_is_trimmed() {
    init_crypto();
    let client = ApiClient::new(Some("http://custom:8080/".to_string()), None);
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
#[serial]
fn test_new_with_default() {
    init_crypto();
    unsafe {
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TOKEN_ENV);
    }
    let client = ApiClient::new(None, None);
    assert_eq!(client.base_url(), DEFAULT_API_URL);
    assert_eq!(client.token(), None);
}

#[test]
#[serial]
fn test_env_fallback() {
    init_crypto();
    unsafe {
        std::env::set_var(API_URL_ENV, "http://from-env:9000");
        std::env::set_var(TOKEN_ENV, "env-token");
    }
    let client = ApiClient::new(None, None);
    assert_eq!(client.base_url(), "http://from-env:9000");
    assert_eq!(client.token(), Some("env-token"));

    let explicit = ApiClient::new(Some("http://flag:1".to_string()), Some("flag-token".to_string()));
    assert_eq!(explicit.base_url(), "http://flag:1");
    assert_eq!(explicit.token(), Some("flag-token"));

    unsafe {
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TOKEN_ENV);
    }
}

#[test]
#[serial]
fn test_require_token() {
    init_crypto();
    unsafe {
        std::env::remove_var(TOKEN_ENV);
    }
    let anonymous = ApiClient::new(Some("http://x".to_string()), None);
    assert!(matches!(
        anonymous.require_token(),
        Err(crate::cli::error::CliError::MissingToken)
    ));

    let empty = ApiClient::new(Some("http://x".to_string()), Some(String::new()));
    assert!(empty.require_token().is_err());

    let signed_in = ApiClient::new(Some("http://x".to_string()), Some("abc".to_string()));
    assert_eq!(signed_in.require_token().unwrap(), "abc");
}

#[test]
fn test_error_message_extraction() {
    assert_eq!(error_message(r#"{"error":"Board not found"}"#), "Board not found");
    assert_eq!(error_message("plain failure"), "plain failure");
    assert_eq!(error_message(r#"{"message":"other"}"#), r#"{"message":"other"}"#);
}
