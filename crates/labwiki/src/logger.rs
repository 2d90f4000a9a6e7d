//! The notebook logger facade.
//!
//! A [`NotebookLogger`] is constructed once against a source handle (the
//! host script's path or its text), scans annotations and provenance up
//! front, then accepts artifact registrations for the rest of the run.
//! Call-site positions are captured through `#[track_caller]`, so `add`
//! works without any runtime stack inspection; harnesses that register
//! content on behalf of another source use `add_at` with an explicit
//! position.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local};
use labwiki_provenance::{
    collect, GitCliInspector, ModuleMetadataProvider, ModuleProvenance, NullProvider,
    RepoInspector,
};
use tracing::debug;

use crate::artifact::{Artifact, CodeBlock, Gallery, GalleryInput, ImageFormat};
use crate::error::{LogError, LogResult};
use crate::format::FormatterRegistry;
use crate::render::{render_document, Preamble, PreambleStyle, RunInfo};
use crate::scanner::{AnnotationScanner, ScanMode, DEFAULT_MARKER};
use crate::store::{ContentStore, Position};

/// Construction-time configuration for a [`NotebookLogger`].
pub struct LoggerOptions {
    /// Category tags emitted at the top of the document.
    pub categories: Vec<String>,
    /// Annotation marker prefix.
    pub marker: String,
    /// How annotation lines are keyed into fragments.
    pub scan_mode: ScanMode,
    /// Which preamble profile the document opens with.
    pub preamble: PreambleStyle,
    /// Directory where generated image files are written.
    pub image_dir: PathBuf,
    /// Module metadata plug-in for the provenance list.
    pub provider: Box<dyn ModuleMetadataProvider>,
    /// Repository inspection plug-in for the provenance list.
    pub inspector: Box<dyn RepoInspector>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            marker: DEFAULT_MARKER.to_string(),
            scan_mode: ScanMode::default(),
            preamble: PreambleStyle::default(),
            image_dir: PathBuf::from("."),
            provider: Box::new(NullProvider),
            inspector: Box::new(GitCliInspector::new()),
        }
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    pub fn with_preamble(mut self, style: PreambleStyle) -> Self {
        self.preamble = style;
        self
    }

    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = dir.into();
        self
    }

    pub fn with_provider(mut self, provider: impl ModuleMetadataProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    pub fn with_inspector(mut self, inspector: impl RepoInspector + 'static) -> Self {
        self.inspector = Box::new(inspector);
        self
    }
}

/// Collects annotations and artifacts from one script run and renders them
/// as a single wiki-markup document.
#[derive(Debug)]
pub struct NotebookLogger {
    store: ContentStore,
    registry: FormatterRegistry,
    provenance: Vec<ModuleProvenance>,
    source_text: String,
    start: DateTime<Local>,
    directory: String,
    host: String,
    categories: Vec<String>,
    marker: String,
    preamble: PreambleStyle,
    image_dir: PathBuf,
}

impl NotebookLogger {
    /// Construct against the script at `path` with default options.
    ///
    /// Reading the file is the one fatal prerequisite: without source text
    /// there are no annotations and no provenance.
    pub fn from_script(path: impl AsRef<Path>) -> LogResult<Self> {
        Self::from_script_with(path, LoggerOptions::default())
    }

    /// Construct against the script at `path` with explicit options.
    pub fn from_script_with(path: impl AsRef<Path>, options: LoggerOptions) -> LogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LogError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(text, options)
    }

    /// Construct from already-loaded source text (the explicit source
    /// handle form, for harnesses and tests).
    pub fn from_source(text: impl Into<String>, options: LoggerOptions) -> LogResult<Self> {
        let source_text = text.into();

        let scanner = AnnotationScanner::new()
            .with_marker(options.marker.clone())
            .with_mode(options.scan_mode);

        let mut store = ContentStore::new();
        for (position, block) in scanner.scan(&source_text) {
            store.insert(position, block)?;
        }
        debug!(annotations = store.len(), "scanned source annotations");

        let provenance = collect(
            &source_text,
            options.provider.as_ref(),
            options.inspector.as_ref(),
        );

        let directory = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|_| String::from("."));

        Ok(Self {
            store,
            registry: FormatterRegistry::new(),
            provenance,
            source_text,
            start: Local::now(),
            directory,
            host: hostname(),
            categories: options.categories,
            marker: options.marker,
            preamble: options.preamble,
            image_dir: options.image_dir,
        })
    }

    /// Register an artifact at the caller's source line.
    #[track_caller]
    pub fn add(&mut self, artifact: impl Into<Artifact>) -> LogResult<&str> {
        let position = std::panic::Location::caller().line();
        self.add_at(position, artifact)
    }

    /// Register an artifact at an explicit position.
    pub fn add_at(&mut self, position: Position, artifact: impl Into<Artifact>) -> LogResult<&str> {
        let rendered = self.registry.render(artifact.into(), &self.image_dir)?;
        self.store.insert(position, rendered)
    }

    /// Register an artifact rendered by an explicit renderer, bypassing
    /// type dispatch entirely.
    #[track_caller]
    pub fn add_with(
        &mut self,
        artifact: impl Into<Artifact>,
        renderer: impl FnOnce(&Artifact) -> String,
    ) -> LogResult<&str> {
        let position = std::panic::Location::caller().line();
        self.add_with_at(position, artifact, renderer)
    }

    /// Explicit-position form of [`add_with`](Self::add_with).
    pub fn add_with_at(
        &mut self,
        position: Position,
        artifact: impl Into<Artifact>,
        renderer: impl FnOnce(&Artifact) -> String,
    ) -> LogResult<&str> {
        let artifact = artifact.into();
        let rendered = renderer(&artifact);
        self.store.insert(position, rendered)
    }

    /// Register a gallery with the default image format.
    #[track_caller]
    pub fn add_gallery(&mut self, input: GalleryInput) -> LogResult<&str> {
        self.add(Gallery::new(input))
    }

    /// Register a gallery with an explicit image format.
    #[track_caller]
    pub fn add_gallery_fmt(&mut self, input: GalleryInput, format: ImageFormat) -> LogResult<&str> {
        self.add(Gallery::new(input).with_format(format))
    }

    /// Register a code listing from a literal string.
    #[track_caller]
    pub fn add_code_str(
        &mut self,
        code: impl Into<String>,
        title: impl Into<String>,
        lang: impl Into<String>,
    ) -> LogResult<&str> {
        self.add(CodeBlock::new(code).with_title(title).with_lang(lang))
    }

    /// Register a code listing read from a file.
    #[track_caller]
    pub fn add_code_file(
        &mut self,
        path: impl AsRef<Path>,
        title: impl Into<String>,
        lang: impl Into<String>,
    ) -> LogResult<&str> {
        let code = std::fs::read_to_string(path)?;
        self.add_code_str(code, title, lang)
    }

    /// Register the host script's own source as a code listing, with
    /// annotation marker lines stripped out.
    #[track_caller]
    pub fn add_script_code(
        &mut self,
        title: impl Into<String>,
        lang: impl Into<String>,
    ) -> LogResult<&str> {
        let code: Vec<&str> = self
            .source_text
            .lines()
            .filter(|line| !line.trim_start().starts_with(&self.marker))
            .collect();
        self.add_code_str(code.join("\n"), title, lang)
    }

    /// Register a renderer for a custom artifact kind.
    pub fn register_formatter(
        &mut self,
        kind: impl Into<String>,
        renderer: impl Fn(&serde_json::Value) -> String + Send + Sync + 'static,
    ) {
        self.registry.register(kind, renderer);
    }

    /// The store of rendered fragments collected so far.
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// The provenance records collected at construction.
    pub fn provenance(&self) -> &[ModuleProvenance] {
        &self.provenance
    }

    /// Render the complete document. The run's end timestamp is taken now.
    pub fn render(&self) -> String {
        let preamble = Preamble {
            categories: self.categories.clone(),
            style: self.preamble,
            info: RunInfo {
                start: self.start,
                end: Local::now(),
                directory: self.directory.clone(),
                host: self.host.clone(),
                runtime_version: env!("LABWIKI_RUSTC_VERSION").to_string(),
            },
        };
        render_document(&preamble, &self.provenance, &self.store)
    }

    /// Write the rendered document to `path`, overwriting any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> LogResult<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

/// Best-effort hostname: the `hostname` utility, then the environment.
fn hostname() -> String {
    Command::new("hostname")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("HOSTNAME").ok())
        .unwrap_or_else(|| String::from("unknown-host"))
}
