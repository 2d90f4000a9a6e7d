//! Import scanning and per-module provenance assembly.
//!
//! The collector reads the host script's source text, finds every
//! import-style statement, reduces the referenced names to their top-level
//! module name, and asks the configured provider/inspector pair for
//! metadata. All lookups are best-effort: a module that cannot be resolved
//! is still listed, just without notes.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::traits::{ModuleMetadataProvider, RepoInspector};

/// Dotted-name tokens inside an import statement, keywords included.
static IMPORT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_.]+").expect("import token regex is valid"));

/// Provenance recorded for one imported top-level module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProvenance {
    /// Top-level module name (portion before the first dot).
    pub name: String,
    /// Free-text notes: branch, commit, dirty flag, version. May be empty.
    pub notes: Vec<String>,
}

impl ModuleProvenance {
    /// Render the notes as a parenthesized, comma-joined summary, or an
    /// empty string when there are none.
    pub fn summary(&self) -> String {
        if self.notes.is_empty() {
            String::new()
        } else {
            format!("({})", self.notes.join(", "))
        }
    }
}

/// Extract the top-level module names referenced by import statements,
/// deduplicated, in first-seen order.
///
/// Handles both statement forms: `import a.b, c` references `a` and `c`;
/// `from a.b import c` references only `a`. An `as` alias ends the name
/// list for that statement.
pub fn imported_modules(source: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for line in source.lines() {
        if !line.starts_with("import") && !line.starts_with("from") {
            continue;
        }
        for (i, token) in IMPORT_TOKEN.find_iter(line).enumerate() {
            let token = token.as_str();
            if token == "as" {
                break;
            }
            if token == "import" && i > 0 {
                // `from x import ...` — only x counts.
                break;
            }
            if token == "from" || token == "import" {
                continue;
            }
            let top = token.split('.').next().unwrap_or(token);
            if seen.insert(top.to_string()) {
                names.push(top.to_string());
            }
        }
    }

    names
}

/// Build the provenance record set for the given source text.
///
/// For each imported name: the provider supplies a version and a source
/// directory; when a directory is known, the inspector contributes
/// repository notes. Notes appear as `branch <b>`, `commit <c>`,
/// `modified files` (dirty tree only), then `v. <version>`.
pub fn collect(
    source: &str,
    provider: &dyn ModuleMetadataProvider,
    inspector: &dyn RepoInspector,
) -> Vec<ModuleProvenance> {
    imported_modules(source)
        .into_iter()
        .map(|name| {
            let mut notes = Vec::new();

            match provider.lookup(&name) {
                Some(info) => {
                    if let Some(dir) = &info.source_dir {
                        if let Some(state) = inspector.inspect(dir) {
                            notes.push(format!("branch {}", state.branch));
                            notes.push(format!("commit {}", state.commit));
                            if state.dirty {
                                notes.push("modified files".to_string());
                            }
                        }
                    }
                    if let Some(version) = &info.version {
                        notes.push(format!("v. {version}"));
                    }
                }
                None => debug!(module = %name, "no metadata available"),
            }

            ModuleProvenance { name, notes }
        })
        .collect()
}
