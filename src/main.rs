// Entrypoint for the CLI application.
// - Reads configuration from the environment and builds the SMMRY client.
// - Runs the prompt chain once, then publishes the post.
// - Store failures are logged and swallowed by default (see
//   `BLOG_ERROR_POLICY`), so the process still exits normally.

use anyhow::Context;
use create_blog::api::SmmryClient;
use create_blog::config::Config;
use create_blog::ui::{collect_draft, TerminalPrompter, WithSpinner};
use create_blog::{logging, BlogStore, Publisher};

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;
    let summarizer = SmmryClient::new(&config.smmry).context("Failed to build HTTP client")?;
    let publisher = Publisher::new(
        BlogStore::new(&config.store_path),
        WithSpinner(summarizer),
        config.error_policy,
    );

    let draft = collect_draft(&mut TerminalPrompter)?;
    let outcome = publisher.publish(draft).context("Failed to publish blog post")?;

    if outcome.created_store {
        println!("Blog post file created!");
    }
    if outcome.saved() {
        println!("Blog post saved to file!");
    }
    println!("{outcome}");
    Ok(())
}
