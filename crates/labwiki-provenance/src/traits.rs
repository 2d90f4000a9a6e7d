//! Plug-in contracts for module metadata and repository inspection.
//!
//! These are the narrow external-collaborator interfaces: given a module
//! name, where does it live and what version is it; given a directory, what
//! is the state of its source-control working tree. Both are best-effort —
//! a `None` answer is always acceptable and never aborts a run.

use std::path::{Path, PathBuf};

/// Metadata reported for one module by a [`ModuleMetadataProvider`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Version string the module advertises, if any.
    pub version: Option<String>,
    /// Directory of the module's source tree, if known. When present, the
    /// collector hands this to a [`RepoInspector`].
    pub source_dir: Option<PathBuf>,
}

/// Trait for looking up module metadata by top-level name.
pub trait ModuleMetadataProvider {
    /// Look up a module. `None` means the module could not be resolved;
    /// the collector records the bare name with no notes.
    fn lookup(&self, name: &str) -> Option<ModuleInfo>;
}

/// Provider that resolves nothing (for runs without metadata).
#[derive(Debug, Clone, Default)]
pub struct NullProvider;

impl ModuleMetadataProvider for NullProvider {
    fn lookup(&self, _name: &str) -> Option<ModuleInfo> {
        None
    }
}

/// Provider backed by a caller-supplied table.
///
/// The harness that drives a run knows its own dependency set; it fills
/// this table once and the collector reads from it.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    modules: std::collections::HashMap<String, ModuleInfo>,
}

impl StaticProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self {
            modules: std::collections::HashMap::new(),
        }
    }

    /// Add a module entry.
    pub fn add(&mut self, name: impl Into<String>, info: ModuleInfo) -> &mut Self {
        self.modules.insert(name.into(), info);
        self
    }

    /// Create a provider with the given entries.
    pub fn with_modules(
        modules: impl IntoIterator<Item = (impl Into<String>, ModuleInfo)>,
    ) -> Self {
        let mut provider = Self::new();
        for (name, info) in modules {
            provider.add(name, info);
        }
        provider
    }
}

impl ModuleMetadataProvider for StaticProvider {
    fn lookup(&self, name: &str) -> Option<ModuleInfo> {
        self.modules.get(name).cloned()
    }
}

/// Source-control state of a working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoState {
    /// Name of the checked-out branch.
    pub branch: String,
    /// Identifier of the latest commit on that branch.
    pub commit: String,
    /// Whether the working tree has uncommitted modifications.
    pub dirty: bool,
}

/// Trait for inspecting a source-control working tree.
pub trait RepoInspector {
    /// Inspect the repository containing `dir`. `None` means the directory
    /// is not a repository or the inspector is unavailable; repository notes
    /// are silently omitted in that case.
    fn inspect(&self, dir: &Path) -> Option<RepoState>;
}

/// Inspector that reports nothing (for testing without a VCS).
#[derive(Debug, Clone, Default)]
pub struct NullInspector;

impl RepoInspector for NullInspector {
    fn inspect(&self, _dir: &Path) -> Option<RepoState> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_provider() {
        assert!(NullProvider.lookup("anything").is_none());
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticProvider::with_modules([(
            "serde",
            ModuleInfo {
                version: Some("1.0.228".to_string()),
                source_dir: None,
            },
        )]);

        let info = provider.lookup("serde").unwrap();
        assert_eq!(info.version.as_deref(), Some("1.0.228"));
        assert!(provider.lookup("missing").is_none());
    }

    #[test]
    fn test_null_inspector() {
        assert!(NullInspector.inspect(Path::new("/tmp")).is_none());
    }
}
