// Revision resolution via the external `git` binary.
use std::path::PathBuf;
use std::process::Command;

use crate::error::InjectError;

/// Resolves the current commit identifier by shelling out to `git rev-parse`.
///
/// The program name and working directory are overridable so the failure
/// path (tool missing, not a checkout) can be exercised deterministically.
pub struct GitResolver {
    program: String,
    work_dir: Option<PathBuf>,
}

impl GitResolver {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            work_dir: None,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Full commit hash of HEAD.
    pub fn resolve_head(&self) -> Result<String, InjectError> {
        self.rev_parse(false)
    }

    /// Abbreviated commit hash of HEAD.
    pub fn resolve_short(&self) -> Result<String, InjectError> {
        self.rev_parse(true)
    }

    fn rev_parse(&self, short: bool) -> Result<String, InjectError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("rev-parse");
        if short {
            cmd.arg("--short");
        }
        cmd.arg("HEAD");
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        let command = if short {
            format!("{} rev-parse --short HEAD", self.program)
        } else {
            format!("{} rev-parse HEAD", self.program)
        };

        let output = cmd
            .output()
            .map_err(|e| InjectError::process(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InjectError::process(&command, stderr.trim().to_string()));
        }

        // git terminates the hash with a newline; the identifier itself
        // never contains whitespace.
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for GitResolver {
    fn default() -> Self {
        Self::new()
    }
}
