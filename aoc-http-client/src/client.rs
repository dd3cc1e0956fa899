//! AOC HTTP client implementation

use crate::error::AocError;
use crate::parser::ResponseParser;
use log::debug;
use reqwest::header::HeaderValue;
use zeroize::Zeroize;

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";
const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);

/// Result of session verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// User ID if session is valid, None otherwise
    pub user_id: Option<u64>,
}

impl SessionInfo {
    /// Whether the session was accepted by the server
    pub fn is_valid(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Blocking client for the two adventofcode.com endpoints the runner needs
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = "your_session_cookie";
///
/// if let Some(user_id) = client.verify_session(session)?.user_id {
///     println!("Session valid! User ID: {}", user_id);
///     let input = client.get_input(2022, 12, session)?;
///     println!("{} bytes", input.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    parser: ResponseParser,
}

impl AocClient {
    /// Create a client for adventofcode.com with rustls and no redirects
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Build the `Cookie` header as a sensitive value, zeroizing the temporary string
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes());
        cookie_string.zeroize();

        let mut header_value = header_value
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()))?;
        header_value.set_sensitive(true);
        Ok(header_value)
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    /// Verify a session cookie and retrieve the user ID
    ///
    /// A 2xx from `/settings` means the session is valid and the user ID is
    /// read from the page. Redirects (the site bounces anonymous visitors to
    /// the home page) and error statuses mean the session is invalid.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionInfo { user_id: Some(id) })` - Session is valid with user ID
    /// * `Ok(SessionInfo { user_id: None })` - Session is invalid
    /// * `Err` - Network error or URL construction error occurred
    pub fn verify_session(&self, session: &str) -> Result<SessionInfo, AocError> {
        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.url_with_segments(&["settings"])?;

        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        if !response.status().is_success() {
            debug!("session rejected with status {}", response.status());
            return Ok(SessionInfo { user_id: None });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        Ok(SessionInfo {
            user_id: self.parser.extract_user_id(&html),
        })
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// The body is returned verbatim; callers decide how to trim it.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error (e.g., 404 if puzzle not available)
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let cookie_header = Self::create_cookie_header(session)?;
        let (year, day) = (year.to_string(), day.to_string());
        let url = self.url_with_segments(&[year.as_str(), "day", day.as_str(), "input"])?;

        debug!("downloading {}", url);
        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        if !response.status().is_success() {
            return Err(AocError::InvalidStatus {
                status: response.status(),
            });
        }

        response.text().map_err(|_| AocError::Encoding)
    }
}

/// Builder for configuring an AOC HTTP client
///
/// The redirect policy is always forced to `Policy::none()` so session
/// verification can see the redirect instead of the home page.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL, validated immediately
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    ///
    /// The redirect policy is overridden regardless of this builder.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self.client_builder.unwrap_or_else(|| {
            reqwest::blocking::Client::builder()
                .use_rustls_tls()
                .user_agent(USER_AGENT)
        });

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            parser: ResponseParser::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = AocClient::builder().build().unwrap();
        assert_eq!(client.base_url.as_str(), "https://adventofcode.com/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(AocClient::builder().base_url("not a valid url").is_err());
    }

    #[test]
    fn test_custom_client_builder() {
        let custom = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .use_rustls_tls();
        assert!(AocClient::builder().client_builder(custom).build().is_ok());
    }

    #[test]
    fn test_invalid_cookie_rejected_before_request() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/settings").expect(0).create();

        let result = client_for(&server).verify_session("bad\nsession");
        assert!(matches!(result, Err(AocError::ClientInit(_))));
        mock.assert();
    }

    #[test]
    fn test_redirect_is_not_followed() {
        let mut server = mockito::Server::new();
        let home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html>(anonymous user #1)</html>")
            .expect(0)
            .create();
        let settings = server
            .mock("GET", "/settings")
            .with_status(302)
            .with_header("location", "/")
            .expect(1)
            .create();

        let info = client_for(&server).verify_session("expired").unwrap();
        assert!(!info.is_valid());

        home.assert();
        settings.assert();
    }

    #[test]
    fn test_valid_session_without_user_id() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/settings")
            .with_status(200)
            .with_body("<html>Settings</html>")
            .create();

        let info = client_for(&server).verify_session("abc").unwrap();
        assert_eq!(info, SessionInfo { user_id: None });
        mock.assert();
    }

    #[test]
    fn test_input_sends_session_cookie() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2022/day/12/input")
            .match_header("cookie", "session=cafe01")
            .with_status(200)
            .with_body("Sabqponm\nabcryxxl\n")
            .expect(1)
            .create();

        let input = client_for(&server).get_input(2022, 12, "cafe01").unwrap();
        assert_eq!(input, "Sabqponm\nabcryxxl\n");
        mock.assert();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_base_url_configuration(
            scheme in prop::sample::select(vec!["http", "https"]),
            host in "[a-z]{3,10}",
            port in 1000u16..10000u16,
        ) {
            let client = AocClient::builder()
                .base_url(format!("{}://{}:{}", scheme, host, port))
                .unwrap()
                .build()
                .unwrap();

            prop_assert_eq!(client.base_url.scheme(), scheme);
            prop_assert_eq!(client.base_url.host_str(), Some(host.as_str()));
            prop_assert_eq!(client.base_url.port(), Some(port));
        }

        #[test]
        fn prop_session_200_is_valid(
            session in "[a-f0-9]{32,128}",
            user_id in 100000u64..999999u64,
        ) {
            let mut server = mockito::Server::new();
            let body = format!("<html><body>Settings (anonymous user #{})</body></html>", user_id);
            let mock = server.mock("GET", "/settings")
                .with_status(200)
                .with_body(&body)
                .expect(1)
                .create();

            let info = client_for(&server).verify_session(&session).unwrap();
            prop_assert_eq!(info.user_id, Some(user_id));
            mock.assert();
        }

        #[test]
        fn prop_session_redirects_and_errors_are_invalid(
            session in "[a-f0-9]{32,128}",
            status_code in prop::sample::select(vec![301, 302, 303, 307, 400, 401, 404, 500, 503]),
        ) {
            let mut server = mockito::Server::new();
            let mock = server.mock("GET", "/settings")
                .with_status(status_code)
                .with_header("location", "/")
                .expect(1)
                .create();

            let info = client_for(&server).verify_session(&session).unwrap();
            prop_assert!(info.user_id.is_none());
            mock.assert();
        }

        #[test]
        fn prop_input_url_construction(
            year in 2015u16..2035u16,
            day in 1u8..=25u8,
            session in "[a-f0-9]{32,128}",
        ) {
            let mut server = mockito::Server::new();
            let path = format!("/{}/day/{}/input", year, day);
            let mock = server.mock("GET", path.as_str())
                .with_status(200)
                .with_body("test input data")
                .expect(1)
                .create();

            let input = client_for(&server).get_input(year, day, &session).unwrap();
            prop_assert_eq!(input, "test input data");
            mock.assert();
        }

        #[test]
        fn prop_input_error_status(
            day in 1u8..=25u8,
            status_code in prop::sample::select(vec![400, 404, 429, 500, 502]),
        ) {
            let mut server = mockito::Server::new();
            let path = format!("/2022/day/{}/input", day);
            let mock = server.mock("GET", path.as_str())
                .with_status(status_code)
                .with_body("Please don't repeatedly request this endpoint before it unlocks!")
                .expect(1)
                .create();

            match client_for(&server).get_input(2022, day, "abc") {
                Err(AocError::InvalidStatus { status }) => {
                    prop_assert_eq!(status.as_u16(), status_code as u16)
                }
                other => prop_assert!(false, "Expected InvalidStatus, got {:?}", other),
            }
            mock.assert();
        }
    }
}
