// API client module: a small blocking HTTP client for the SMMRY
// summarization service. The excerpt stored with every blog post comes
// from here.

use crate::config::SmmryConfig;
use crate::error::SummarizeError;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

/// Anything that can turn a post body into a short excerpt. The pipeline
/// only talks to this trait so tests can plug in a canned summarizer.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Client for `https://api.smmry.com`. The key and the summary length
/// travel as query parameters, the text as the `sm_api_input` form field.
#[derive(Clone)]
pub struct SmmryClient {
    client: Client,
    api_url: String,
    api_key: String,
    length: u32,
}

/// Response body. On success `sm_api_content` holds the summary; on
/// failure SMMRY still answers 200 and fills `sm_api_error` instead.
#[derive(Deserialize, Debug, Default)]
pub struct SmmryResponse {
    #[serde(default)]
    pub sm_api_content: Option<String>,
    #[serde(default)]
    pub sm_api_character_count: Option<String>,
    #[serde(default)]
    pub sm_api_limitation: Option<String>,
    #[serde(default)]
    pub sm_api_error: Option<i64>,
    #[serde(default)]
    pub sm_api_message: Option<String>,
}

impl SmmryResponse {
    /// The excerpt, or the error SMMRY reported.
    pub fn into_excerpt(self) -> Result<String, SummarizeError> {
        if let Some(code) = self.sm_api_error {
            return Err(SummarizeError::Api {
                code,
                message: self.sm_api_message.unwrap_or_default(),
            });
        }
        self.sm_api_content.ok_or(SummarizeError::MissingContent)
    }
}

impl SmmryClient {
    /// Build the client. No request timeout unless one is configured.
    pub fn new(config: &SmmryConfig) -> Result<Self, SummarizeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(SmmryClient {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            length: config.length,
        })
    }
}

impl Summarizer for SmmryClient {
    fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let length = self.length.to_string();
        let res = self
            .client
            .post(&self.api_url)
            .query(&[("SM_API_KEY", self.api_key.as_str()), ("SM_LENGTH", length.as_str())])
            .form(&[("sm_api_input", text)])
            .send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(SummarizeError::Status { status, body });
        }
        let resp: SmmryResponse = res.json()?;
        debug!(
            characters = resp.sm_api_character_count.as_deref().unwrap_or("?"),
            limitation = resp.sm_api_limitation.as_deref().unwrap_or(""),
            "summary received"
        );
        resp.into_excerpt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_yields_content() {
        let resp: SmmryResponse = serde_json::from_str(
            r#"{"sm_api_character_count":"42","sm_api_content":"Short summary.","sm_api_limitation":"Waited 0 extra seconds"}"#,
        )
        .unwrap();
        assert_eq!(resp.into_excerpt().unwrap(), "Short summary.");
    }

    #[test]
    fn error_response_is_reported() {
        let resp: SmmryResponse =
            serde_json::from_str(r#"{"sm_api_error":1,"sm_api_message":"INVALID API KEY"}"#).unwrap();
        match resp.into_excerpt() {
            Err(SummarizeError::Api { code, message }) => {
                assert_eq!(code, 1);
                assert_eq!(message, "INVALID API KEY");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_response_has_no_excerpt() {
        let resp: SmmryResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.into_excerpt(), Err(SummarizeError::MissingContent)));
    }
}
