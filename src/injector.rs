// The end-to-end pipeline: resolve revision, read document, substitute, write back.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::InjectError;
use crate::git::GitResolver;
use crate::template::{self, Substitution, DATE_TOKEN, HASH_SHORT_TOKEN, HASH_TOKEN};

/// Outcome of injecting one document.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub replaced: usize,
    pub bytes: usize,
    pub changed: bool,
    /// Whether the document contained the primary token before rendering.
    pub had_token: bool,
}

/// Performs the document transformation for a single resolved revision.
///
/// The revision is resolved once, up front, before any file is opened.
/// A resolution failure therefore leaves every target file untouched.
pub struct Injector {
    revision: String,
    short_revision: String,
    date: String,
    primary_token: String,
    use_short: bool,
    companions: bool,
    dry_run: bool,
}

impl Injector {
    /// Resolves the revision from the current checkout.
    pub fn from_git() -> Result<Self, InjectError> {
        Self::from_resolver(&GitResolver::new())
    }

    pub fn from_resolver(resolver: &GitResolver) -> Result<Self, InjectError> {
        let revision = resolver.resolve_head()?;
        let short_revision = resolver.resolve_short()?;
        Ok(Self::with_revisions(revision, short_revision))
    }

    /// Builds an injector around already-known revisions. Used by tests and
    /// by callers that resolve through other means.
    pub fn with_revisions(revision: impl Into<String>, short_revision: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            short_revision: short_revision.into(),
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            primary_token: HASH_TOKEN.to_string(),
            use_short: false,
            companions: false,
            dry_run: false,
        }
    }

    /// Overrides the primary placeholder token (default `{{HASH}}`).
    pub fn primary_token(mut self, token: impl Into<String>) -> Self {
        self.primary_token = token.into();
        self
    }

    /// Substitutes the abbreviated revision for the primary token.
    pub fn use_short(mut self, yes: bool) -> Self {
        self.use_short = yes;
        self
    }

    /// Also resolves the `{{HASH_SHORT}}` and `{{DATE}}` placeholders.
    /// Off by default: a document without the primary token must come
    /// back byte-identical unless the caller opted in.
    pub fn with_companions(mut self, yes: bool) -> Self {
        self.companions = yes;
        self
    }

    /// Renders without writing anything back.
    pub fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    pub fn revision(&self) -> &str {
        if self.use_short {
            &self.short_revision
        } else {
            &self.revision
        }
    }

    pub fn token(&self) -> &str {
        &self.primary_token
    }

    /// Applies all substitutions to `content`, returning the rendered text
    /// and the number of replacements made.
    pub fn render(&self, content: &str) -> (String, usize) {
        let mut substitutions = vec![Substitution {
            token: &self.primary_token,
            value: self.revision(),
        }];

        // Companion placeholders, skipped when the primary token shadows them.
        if self.companions {
            for (token, value) in [
                (HASH_SHORT_TOKEN, self.short_revision.as_str()),
                (DATE_TOKEN, self.date.as_str()),
            ] {
                if token != self.primary_token {
                    substitutions.push(Substitution { token, value });
                }
            }
        }

        template::apply(content, &substitutions)
    }

    /// Whether `content` contains the primary token at all.
    pub fn contains_token(&self, content: &str) -> bool {
        template::count_occurrences(content, &self.primary_token) > 0
    }

    /// Read, substitute, overwrite in full. Truncate-then-write semantics:
    /// the file is rewritten even when no token matched.
    pub fn inject(&self, path: &Path) -> Result<FileReport, InjectError> {
        let content = fs::read_to_string(path).map_err(|e| InjectError::read(path, e))?;
        let had_token = self.contains_token(&content);
        let (rendered, replaced) = self.render(&content);

        if !self.dry_run {
            fs::write(path, &rendered).map_err(|e| InjectError::write(path, e))?;
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            replaced,
            bytes: rendered.len(),
            changed: rendered != content,
            had_token,
        })
    }
}
