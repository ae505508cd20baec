use crate::config::Config;
use anyhow::{Context as _, Result};
use colored::Colorize;
use pagecraft_editor::{Document, EditSession, MutationResult, SessionOptions};
use pagecraft_schema::Registry;
use std::path::{Path, PathBuf};

/// Everything a command needs to find and edit the page
#[derive(Debug)]
pub struct Context {
    pub cwd: String,
    pub config: Config,
    pub page_path: PathBuf,
}

impl Context {
    pub fn new(cwd: &str, page: Option<&Path>) -> Result<Self> {
        let config = Config::load(cwd)?;
        let page_path = config.page_path(cwd, page);

        Ok(Self {
            cwd: cwd.to_string(),
            config,
            page_path,
        })
    }

    pub fn registry(&self) -> Result<Registry> {
        self.config.registry(&self.cwd)
    }

    pub fn load_document(&self) -> Result<Document> {
        Document::load(&self.page_path)
            .with_context(|| format!("Cannot open page {}", self.page_path.display()))
    }

    /// Session over the page file with the configured registry
    pub fn open_session(&self) -> Result<EditSession> {
        let options = SessionOptions {
            seed_default_props: self.config.seed_default_props,
        };
        Ok(EditSession::open(self.load_document()?, self.registry()?, options))
    }

    pub fn save(&self, document: &mut Document) -> Result<()> {
        document
            .save_with(&self.config.serializer())
            .with_context(|| format!("Cannot write page {}", self.page_path.display()))
    }

    /// Apply the outcome of an edit: save on change, explain a rejection.
    ///
    /// Returns whether the page changed.
    pub fn finish(&self, session: &mut EditSession, result: &MutationResult, done: &str) -> Result<bool> {
        self.finish_all(session, std::slice::from_ref(result), done)
    }

    /// Like `finish` for a run of edits made in one session.
    ///
    /// Any rejection leaves the file as it was, even if earlier edits applied
    /// in memory.
    pub fn finish_all(&self, session: &mut EditSession, results: &[MutationResult], done: &str) -> Result<bool> {
        if let Some(reason) = results.iter().find_map(|r| r.rejection.as_ref()) {
            println!("{} {}", "No change:".yellow().bold(), reason);
            return Ok(false);
        }
        if !results.iter().any(|r| r.changed) {
            println!("{} nothing to do", "No change:".yellow().bold());
            return Ok(false);
        }

        self.save(&mut session.document)?;
        println!("{} {}", "✓".green(), done);
        Ok(true)
    }
}
