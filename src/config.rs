// Runtime configuration, read from environment variables once at start-up.

use crate::publish::ErrorPolicy;
use crate::store::DEFAULT_STORE_PATH;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SMMRY_URL: &str = "https://api.smmry.com";
pub const DEFAULT_SUMMARY_LENGTH: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store_path: PathBuf,
    pub error_policy: ErrorPolicy,
    pub smmry: SmmryConfig,
}

/// Settings for the SMMRY client.
#[derive(Debug, Clone, PartialEq)]
pub struct SmmryConfig {
    pub api_url: String,
    pub api_key: String,
    /// Target summary length in sentences.
    pub length: u32,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Read `SMMRY_API_KEY` (required), `SMMRY_API_URL`, `SMMRY_LENGTH`,
    /// `SMMRY_TIMEOUT_SECS`, `BLOG_POSTS_PATH` and `BLOG_ERROR_POLICY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("SMMRY_API_KEY").context("SMMRY_API_KEY is not set")?;
        let length = match get("SMMRY_LENGTH") {
            Some(raw) => {
                let n: u32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("SMMRY_LENGTH must be a number, got {raw:?}"))?;
                if n == 0 {
                    bail!("SMMRY_LENGTH must be at least 1");
                }
                n
            }
            None => DEFAULT_SUMMARY_LENGTH,
        };
        let timeout = get("SMMRY_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("SMMRY_TIMEOUT_SECS must be a number, got {raw:?}"))
            })
            .transpose()?;
        let error_policy = match get("BLOG_ERROR_POLICY") {
            Some(raw) => raw.parse()?,
            None => ErrorPolicy::default(),
        };

        Ok(Config {
            store_path: get("BLOG_POSTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            error_policy,
            smmry: SmmryConfig {
                api_url: get("SMMRY_API_URL").unwrap_or_else(|| DEFAULT_SMMRY_URL.into()),
                api_key,
                length,
                timeout,
            },
        })
    }
}
