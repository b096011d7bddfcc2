// Library root
// -----------
// This crate exposes the pieces of the `create-blog` CLI as a library so
// they can be tested without a terminal or a network connection.
//
// Module responsibilities:
// - `store`: the JSON array file that holds every blog post.
// - `post`: the record model, slug and date helpers.
// - `api`: the `Summarizer` trait and the SMMRY HTTP client.
// - `ui`: the interactive prompt chain.
// - `publish`: summarize, then append, with a configurable error policy.
// - `config`, `error`, `logging`: environment settings, error kinds and
//   the tracing subscriber.
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod post;
pub mod publish;
pub mod store;
pub mod ui;

pub use error::{PostError, StoreError, SummarizeError};
pub use post::{BlogPost, PostDraft};
pub use publish::{ErrorPolicy, PublishOutcome, Publisher};
pub use store::BlogStore;
