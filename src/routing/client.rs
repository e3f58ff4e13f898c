//! User-agent classification.

/// Kind of client a request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientClass {
    /// The mobile app's HTTP client
    App,
    /// Anything else, including requests without a User-Agent
    Browser,
}

impl ClientClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Browser => "browser",
        }
    }
}

/// Classify a request by plain substring match against the app markers
pub fn classify(user_agent: &str, app_agents: &[String]) -> ClientClass {
    if app_agents
        .iter()
        .any(|marker| !marker.is_empty() && user_agent.contains(marker.as_str()))
    {
        ClientClass::App
    } else {
        ClientClass::Browser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec![
            "okhttp/3.15".to_string(),
            "okhttp/4.12".to_string(),
            "okhttp/4.50".to_string(),
        ]
    }

    #[test]
    fn test_app_agents() {
        assert_eq!(classify("okhttp/3.15.0", &markers()), ClientClass::App);
        assert_eq!(classify("okhttp/4.12.0", &markers()), ClientClass::App);
        assert_eq!(
            classify("MyApp/2.1 okhttp/4.50", &markers()),
            ClientClass::App
        );
    }

    #[test]
    fn test_browser_agents() {
        assert_eq!(
            classify(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
                &markers()
            ),
            ClientClass::Browser
        );
        assert_eq!(classify("okhttp/4.11.0", &markers()), ClientClass::Browser);
        assert_eq!(classify("", &markers()), ClientClass::Browser);
    }

    #[test]
    fn test_empty_marker_never_matches() {
        let markers = vec![String::new()];
        assert_eq!(classify("curl/8.0", &markers), ClientClass::Browser);
    }
}
