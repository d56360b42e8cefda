//! Source of the text to speak.

use std::time::Duration;

/// Fortune API endpoint. The key goes in the `code` query parameter.
pub const FORTUNE_ENDPOINT: &str = "https://hlbfunc01.azurewebsites.net/api/fortune";

/// Environment variable holding the API key.
pub const FUNCTION_KEY_VAR: &str = "AZURE_FUNCTION_KEY";

#[derive(thiserror::Error, Debug)]
pub enum FortuneError {
    #[error("Environment variable '{}' is not set.", FUNCTION_KEY_VAR)]
    MissingCredential,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Anything that can hand the pipeline a piece of text to speak.
pub trait TextProvider {
    fn fetch_text(&self) -> Result<String, FortuneError>;
}

/// Client for the fortune web API.
///
/// One GET per call, no timeout, no retry. The response body is returned as
/// is, whatever the status code.
#[derive(Debug, Clone)]
pub struct FortuneClient {
    endpoint: String,
    key: Option<String>,
    http: reqwest::blocking::Client,
}

impl FortuneClient {
    pub fn new(endpoint: impl Into<String>, key: Option<String>) -> Result<Self, FortuneError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            key,
            http,
        })
    }

    /// Client for [`FORTUNE_ENDPOINT`] keyed from `AZURE_FUNCTION_KEY`.
    ///
    /// A missing key is not an error here; it surfaces on the first fetch.
    pub fn from_env() -> Result<Self, FortuneError> {
        Self::new(FORTUNE_ENDPOINT, std::env::var(FUNCTION_KEY_VAR).ok())
    }

    pub fn has_credential(&self) -> bool {
        self.key.is_some()
    }

    /// `<endpoint>?code=<key>`, or `None` without a key.
    pub fn request_url(&self) -> Option<String> {
        self.key
            .as_ref()
            .map(|key| format!("{}?code={}", self.endpoint, key))
    }
}

impl TextProvider for FortuneClient {
    fn fetch_text(&self) -> Result<String, FortuneError> {
        let Some(url) = self.request_url() else {
            log::error!("Environment variable '{FUNCTION_KEY_VAR}' is not set.");
            return Err(FortuneError::MissingCredential);
        };

        log::info!("endpoint: {url}");
        let response = self.http.get(&url).send()?;
        log::debug!("Fortune API status: {}", response.status());

        Ok(response.text()?)
    }
}

/// Fixed text, used when the fortune API is bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalText(pub String);

impl TextProvider for LocalText {
    fn fetch_text(&self) -> Result<String, FortuneError> {
        Ok(self.0.clone())
    }
}
