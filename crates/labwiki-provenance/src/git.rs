//! Repository inspection through the `git` command-line client.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::traits::{RepoInspector, RepoState};

/// Inspector that shells out to the `git` CLI.
///
/// Every query is run with `-C <dir>` so the inspected directory does not
/// have to be the process working directory. Any failure — git missing,
/// directory not a repository, detached HEAD weirdness — yields `None`.
#[derive(Debug, Clone, Default)]
pub struct GitCliInspector;

impl GitCliInspector {
    /// Create a new inspector.
    pub fn new() -> Self {
        Self
    }

    fn git(&self, dir: &Path, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .ok()?;
        if !output.status.success() {
            debug!(dir = %dir.display(), ?args, "git query failed");
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        Some(text.trim_end().to_string())
    }
}

impl RepoInspector for GitCliInspector {
    fn inspect(&self, dir: &Path) -> Option<RepoState> {
        let branch = self.git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        let commit = self.git(dir, &["rev-parse", "--short", "HEAD"])?;
        // Porcelain output is empty for a clean tree.
        let dirty = self
            .git(dir, &["status", "--porcelain"])
            .is_some_and(|s| !s.is_empty());

        Some(RepoState {
            branch,
            commit,
            dirty,
        })
    }
}
