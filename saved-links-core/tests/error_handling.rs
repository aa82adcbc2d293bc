use saved_links_core::{ConfigError, CoreError, ErrorExt, RedditApiError};

#[test]
fn test_error_codes() {
    let reddit_error = CoreError::RedditApi(RedditApiError::UnexpectedStatus {
        status_code: 401,
        endpoint: "best".to_string(),
    });
    assert_eq!(reddit_error.error_code(), "REDDIT_API");

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "client_id".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let input_error = CoreError::InvalidInput {
        message: "bad header".to_string(),
    };
    assert_eq!(input_error.error_code(), "INVALID_INPUT");
}

#[test]
fn test_nested_error_codes() {
    let auth_error = RedditApiError::AuthenticationFailed {
        reason: "invalid_grant".to_string(),
    };
    assert_eq!(auth_error.error_code(), "REDDIT_AUTH_FAILED");

    let parse_error = RedditApiError::InvalidResponse {
        details: "missing field `title`".to_string(),
    };
    assert_eq!(parse_error.error_code(), "REDDIT_INVALID_RESPONSE");
}

#[test]
fn test_upstream_status() {
    let error = CoreError::RedditApi(RedditApiError::UnexpectedStatus {
        status_code: 429,
        endpoint: "best".to_string(),
    });
    assert_eq!(error.upstream_status(), Some(429));

    let error = CoreError::RedditApi(RedditApiError::InvalidResponse {
        details: "not json".to_string(),
    });
    assert_eq!(error.upstream_status(), None);
}

#[test]
fn test_user_friendly_messages() {
    let expired = CoreError::RedditApi(RedditApiError::UnexpectedStatus {
        status_code: 401,
        endpoint: "api/v1/me/karma".to_string(),
    });
    let message = expired.user_friendly_message();
    assert!(message.contains("token is invalid"));

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "client_secret".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("client_secret"));
}

#[test]
fn test_logging_does_not_panic() {
    let error = CoreError::RedditApi(RedditApiError::AuthenticationFailed {
        reason: "invalid_grant".to_string(),
    });
    error.log_error();
    error.log_warn();
}
