//! Share links for a quiz result.
//!
//! Builds the public result URL and the X / LinkedIn share-intent URLs that
//! point at it. The persona's display name and description come from the
//! caller; this module only assembles and encodes URLs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::persona::PersonaSlug;

pub const X_INTENT_URL: &str = "https://twitter.com/intent/tweet";
pub const LINKEDIN_SHARE_URL: &str = "https://www.linkedin.com/sharing/share-offsite/";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Base URL cannot carry a path: {0}")]
    CannotBeABase(String),
}

fn default_text_template() -> String {
    "My persona is \"{name}\"!\n{description}".to_string()
}

fn default_hashtags() -> Vec<String> {
    vec!["PersonaQuiz".to_string()]
}

/// Wording of the X post. `{name}` and `{description}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareConfig {
    #[serde(default = "default_text_template")]
    pub text_template: String,
    #[serde(default = "default_hashtags")]
    pub hashtags: Vec<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            text_template: default_text_template(),
            hashtags: default_hashtags(),
        }
    }
}

impl ShareConfig {
    fn render_text(&self, name: &str, description: &str) -> String {
        self.text_template
            .replace("{name}", name)
            .replace("{description}", description)
    }
}

/// Every URL needed to share one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub result_url: String,
    pub x_url: String,
    pub linkedin_url: String,
}

/// `{base}/result/{slug}`, keeping any path already on `base`.
pub fn result_url(base_url: &str, persona: PersonaSlug) -> Result<Url, ShareError> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ShareError::CannotBeABase(base_url.to_string()))?
        .pop_if_empty()
        .extend(["result", persona.as_str()]);
    Ok(url)
}

impl ShareLinks {
    pub fn build(
        base_url: &str,
        persona: PersonaSlug,
        name: &str,
        description: &str,
        config: &ShareConfig,
    ) -> Result<Self, ShareError> {
        let result = result_url(base_url, persona)?;

        let mut x = Url::parse(X_INTENT_URL)?;
        x.query_pairs_mut()
            .append_pair("text", &config.render_text(name, description))
            .append_pair("url", result.as_str())
            .append_pair("hashtags", &config.hashtags.join(","));

        let mut linkedin = Url::parse(LINKEDIN_SHARE_URL)?;
        linkedin.query_pairs_mut().append_pair("url", result.as_str());

        Ok(Self {
            result_url: result.into(),
            x_url: x.into(),
            linkedin_url: linkedin.into(),
        })
    }
}
