//! Lab-notebook logger that renders annotated script runs as wiki markup.
//!
//! A running script annotates itself with `#@` comment lines; a
//! [`NotebookLogger`] built against that script collects the annotations
//! plus any artifacts (figures, tables, code listings, image galleries)
//! registered during execution, and renders everything, in the order it
//! occurred, into one structured wiki-markup document.
//!
//! Ordering is by source-line position throughout: annotation blocks are
//! keyed by the line of their last marker line, artifacts by the line of
//! the call that registered them (captured with `#[track_caller]`), and the
//! final document replays the combined keyspace in ascending order.
//!
//! # Example
//!
//! ```no_run
//! use labwiki::{LoggerOptions, NotebookLogger, Table};
//!
//! let options = LoggerOptions::new().with_categories(["example"]);
//! let mut log = NotebookLogger::from_script_with("analysis.py", options)?;
//!
//! let mut results = Table::new(["trial", "score"]);
//! results.push_row(["1", "0.93"]);
//! log.add(results)?;
//!
//! log.save("analysis.mw")?;
//! # Ok::<(), labwiki::LogError>(())
//! ```

pub mod artifact;
pub mod error;
pub mod format;
pub mod gallery;
pub mod logger;
pub mod render;
pub mod scanner;
pub mod store;

// Re-export main types at crate root
pub use artifact::{
    Artifact, CodeBlock, Figure, Gallery, GalleryInput, ImageData, ImageFormat, ImageRef, Table,
};
pub use error::{LogError, LogResult};
pub use format::FormatterRegistry;
pub use gallery::{GalleryEntry, PLACEHOLDER_CAPTION};
pub use logger::{LoggerOptions, NotebookLogger};
pub use render::{Preamble, PreambleStyle, RunInfo};
pub use scanner::{AnnotationScanner, ScanMode, DEFAULT_MARKER};
pub use store::{ContentStore, Position};

// The provenance plug-in surface, re-exported so callers configuring a
// logger do not need a direct dependency on the collaborator crate.
pub use labwiki_provenance::{
    ModuleInfo, ModuleMetadataProvider, ModuleProvenance, NullInspector, NullProvider,
    RepoInspector, RepoState, StaticProvider,
};
