//! Module metadata and repository-state collection for labwiki.
//!
//! A lab-notebook document opens with a list of the libraries the host
//! script imported, each annotated with whatever version and source-control
//! information could be scraped together. This crate owns that boundary:
//!
//! - [`imported_modules`]/[`collect`] scan the script's import statements
//!   and assemble a [`ModuleProvenance`] record per top-level module.
//! - [`ModuleMetadataProvider`] answers "what version, what source tree?"
//!   for a module name ([`StaticProvider`] for harness-supplied tables,
//!   [`NullProvider`] for none).
//! - [`RepoInspector`] answers "what branch/commit, is it dirty?" for a
//!   source tree ([`GitCliInspector`] via the git CLI, [`NullInspector`]
//!   for none).
//!
//! Everything here is best-effort. Lookups that fail produce modules with
//! empty note lists, never errors.

pub mod collect;
pub mod git;
pub mod traits;

pub use collect::{collect, imported_modules, ModuleProvenance};
pub use git::GitCliInspector;
pub use traits::{
    ModuleInfo, ModuleMetadataProvider, NullInspector, NullProvider, RepoInspector, RepoState,
    StaticProvider,
};
