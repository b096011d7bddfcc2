// Publish pipeline: summarize the body, make sure the store exists, then
// read, merge and write. Each step runs only after the previous one has
// finished.

use crate::api::Summarizer;
use crate::error::{PostError, SummarizeError};
use crate::post::{BlogPost, PostDraft};
use crate::store::BlogStore;
use std::fmt;
use std::str::FromStr;
use tracing::{error, info};

/// What to do when writing the record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure, record it in the outcome and carry on.
    #[default]
    LogAndContinue,
    /// Hand the failure back to the caller.
    Propagate,
}

impl FromStr for ErrorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "log-and-continue" => Ok(ErrorPolicy::LogAndContinue),
            "propagate" => Ok(ErrorPolicy::Propagate),
            other => anyhow::bail!("unknown error policy {other:?}, expected \"log\" or \"propagate\""),
        }
    }
}

/// Errors that escape [`Publisher::publish`].
#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    /// Summarizer failures always propagate.
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Store(#[from] crate::error::StoreError),
}

/// Result of one publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub post: Option<BlogPost>,
    /// True when the store file was created by this run.
    pub created_store: bool,
    /// Record count after the write, when it happened.
    pub total: Option<usize>,
    /// Failures that were logged and swallowed.
    pub diagnostics: Vec<String>,
}

impl PublishOutcome {
    pub fn saved(&self) -> bool {
        self.total.is_some()
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.total, &self.post) {
            (Some(total), Some(post)) => {
                write!(f, "Blog post \"{}\" saved ({} posts in store)", post.slug, total)
            }
            _ => write!(f, "Blog post not saved: {}", self.diagnostics.join("; ")),
        }
    }
}

pub struct Publisher<S> {
    store: BlogStore,
    summarizer: S,
    policy: ErrorPolicy,
}

impl<S: Summarizer> Publisher<S> {
    pub fn new(store: BlogStore, summarizer: S, policy: ErrorPolicy) -> Self {
        Publisher {
            store,
            summarizer,
            policy,
        }
    }

    pub fn store(&self) -> &BlogStore {
        &self.store
    }

    /// Summarize, shape the record and append it to the store.
    pub fn publish(&self, draft: PostDraft) -> Result<PublishOutcome, PublishError> {
        let excerpt = self.summarizer.summarize(&draft.body)?;

        let mut outcome = PublishOutcome {
            post: None,
            created_store: false,
            total: None,
            diagnostics: Vec::new(),
        };

        let post = match BlogPost::from_draft(draft, excerpt) {
            Ok(post) => post,
            Err(e) => return self.swallow(outcome, e.into()),
        };

        let stored = self.store.ensure_exists().and_then(|created| {
            outcome.created_store = created;
            self.store.append(&post)
        });

        match stored {
            Ok(total) => {
                info!(slug = %post.slug, total, "blog post saved");
                outcome.total = Some(total);
                outcome.post = Some(post);
                Ok(outcome)
            }
            Err(e) => {
                outcome.post = Some(post);
                self.swallow(outcome, e.into())
            }
        }
    }

    fn swallow(
        &self,
        mut outcome: PublishOutcome,
        err: PublishError,
    ) -> Result<PublishOutcome, PublishError> {
        match self.policy {
            ErrorPolicy::Propagate => Err(err),
            ErrorPolicy::LogAndContinue => {
                error!(error = %err, "failed to save blog post");
                outcome.diagnostics.push(err.to_string());
                Ok(outcome)
            }
        }
    }
}
