// UI layer: the interactive prompt chain built on `dialoguer`, plus the
// spinner shown while the summarizer works.

use crate::api::Summarizer;
use crate::error::SummarizeError;
use crate::post::{split_categories, PostDraft};
use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TITLE_PROMPT: &str = "Enter blog post title";
pub const AUTHOR_PROMPT: &str = "Enter blog post author";
pub const CATEGORIES_PROMPT: &str = "Enter blog post categories (comma-separated)";
pub const DATE_PROMPT: &str = "Enter blog post published date (YYYY-MM-DD)";
pub const DESCRIPTION_PROMPT: &str = "Enter blog post description";
pub const BODY_PROMPT: &str = "Enter blog post body";

/// Source of free-text answers. The terminal implementation is below;
/// tests drive the chain with a scripted one.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Reads answers from the terminal. Empty answers are accepted, as any
/// field may legitimately be blank.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("reading answer to {prompt:?}"))?;
        Ok(answer)
    }
}

/// Ask for every field in order and collect the answers.
pub fn collect_draft<P: Prompter>(prompter: &mut P) -> Result<PostDraft> {
    let title = prompter.ask(TITLE_PROMPT)?;
    let author = prompter.ask(AUTHOR_PROMPT)?;
    let categories = split_categories(&prompter.ask(CATEGORIES_PROMPT)?);
    let published_date = prompter.ask(DATE_PROMPT)?;
    let description = prompter.ask(DESCRIPTION_PROMPT)?;
    let body = prompter.ask(BODY_PROMPT)?;
    Ok(PostDraft {
        title,
        author,
        categories,
        published_date,
        description,
        body,
    })
}

/// Wraps a summarizer with a terminal spinner for the duration of the call.
pub struct WithSpinner<S>(pub S);

impl<S: Summarizer> Summarizer for WithSpinner<S> {
    fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Summarizing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = self.0.summarize(text);
        spinner.finish_and_clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
    }

    impl Prompter for Scripted {
        fn ask(&mut self, prompt: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            self.answers
                .pop_front()
                .map(String::from)
                .context("script ran out of answers")
        }
    }

    #[test]
    fn prompts_run_in_order() {
        let mut prompter = Scripted {
            answers: VecDeque::from([
                "Hello World",
                "Ada",
                "rust, cli",
                "2024-01-15",
                "A first post",
                "Body text.",
            ]),
            asked: Vec::new(),
        };

        let draft = collect_draft(&mut prompter).unwrap();
        assert_eq!(
            prompter.asked,
            vec![TITLE_PROMPT, AUTHOR_PROMPT, CATEGORIES_PROMPT, DATE_PROMPT, DESCRIPTION_PROMPT, BODY_PROMPT]
        );
        assert_eq!(draft.title, "Hello World");
        assert_eq!(draft.categories, vec!["rust", " cli"]);
        assert_eq!(draft.published_date, "2024-01-15");
        assert_eq!(draft.body, "Body text.");
    }

    #[test]
    fn prompt_failure_stops_the_chain() {
        let mut prompter = Scripted {
            answers: VecDeque::from(["Only a title"]),
            asked: Vec::new(),
        };
        assert!(collect_draft(&mut prompter).is_err());
        assert_eq!(prompter.asked.len(), 2);
    }
}
