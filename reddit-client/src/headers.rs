use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use saved_links_core::CoreError;

/// Headers sent with every call to the Reddit API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    user_agent: String,
    authorization: Option<String>,
}

impl RequestHeaders {
    /// An empty token is treated the same as no token.
    pub fn new(user_agent: impl Into<String>, token: Option<&str>) -> Self {
        Self {
            user_agent: user_agent.into(),
            authorization: token
                .filter(|token| !token.is_empty())
                .map(|token| format!("bearer {}", token)),
        }
    }

    /// Same user agent, new bearer token.
    pub fn with_token(&self, token: &str) -> Self {
        Self::new(self.user_agent.clone(), Some(token))
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    pub fn to_header_map(&self) -> Result<HeaderMap, CoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("User-Agent", &self.user_agent)?);
        if let Some(authorization) = &self.authorization {
            let mut value = header_value("Authorization", authorization)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, CoreError> {
    HeaderValue::from_str(value).map_err(|_| CoreError::InvalidInput {
        message: format!("{} header contains characters not allowed in HTTP", name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_token() {
        let headers = RequestHeaders::new("saved-links app by test_user", None);
        assert_eq!(headers.user_agent(), "saved-links app by test_user");
        assert!(headers.authorization().is_none());

        let map = headers.to_header_map().unwrap();
        assert!(map.get(AUTHORIZATION).is_none());
        assert_eq!(map.get(USER_AGENT).unwrap(), "saved-links app by test_user");
    }

    #[test]
    fn test_headers_with_token() {
        let headers = RequestHeaders::new("agent", Some("abc.DEF-123"));
        assert_eq!(headers.authorization(), Some("bearer abc.DEF-123"));

        let map = headers.to_header_map().unwrap();
        assert_eq!(map.get(AUTHORIZATION).unwrap(), "bearer abc.DEF-123");
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let headers = RequestHeaders::new("agent", Some(""));
        assert!(headers.authorization().is_none());
    }

    #[test]
    fn test_with_token_keeps_user_agent() {
        let headers = RequestHeaders::new("agent", Some("old"));
        let refreshed = headers.with_token("new");
        assert_eq!(refreshed.user_agent(), "agent");
        assert_eq!(refreshed.authorization(), Some("bearer new"));
        assert_eq!(headers.authorization(), Some("bearer old"));
    }

    #[test]
    fn test_invalid_header_value() {
        let headers = RequestHeaders::new("agent\nwith newline", None);
        assert!(matches!(
            headers.to_header_map(),
            Err(CoreError::InvalidInput { .. })
        ));
    }
}
