//! The artifact model: everything that can be registered into a notebook.
//!
//! Artifacts form a closed sum type dispatched exhaustively by the
//! formatter registry; third-party kinds go through [`Artifact::Custom`]
//! with a JSON payload and a renderer registered at runtime.

use serde::{Deserialize, Serialize};

/// Default title used when a code block is added without one.
pub const DEFAULT_CODE_TITLE: &str = "no code title given";

/// Image file format, used for the extension of generated filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
}

impl ImageFormat {
    /// Filename extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
        }
    }
}

/// An in-memory image that has not been written to disk yet.
///
/// The logger does not interpret the bytes; whatever produced them (a
/// plotting library, a screenshot grabber) is responsible for encoding them
/// in the format the call site declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// Reference to an image: either a file already on disk (by name) or
/// in-memory data that must be materialized to a generated filename before
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    File(String),
    Data(ImageData),
}

impl From<&str> for ImageRef {
    fn from(name: &str) -> Self {
        ImageRef::File(name.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(name: String) -> Self {
        ImageRef::File(name)
    }
}

impl From<ImageData> for ImageRef {
    fn from(data: ImageData) -> Self {
        ImageRef::Data(data)
    }
}

/// The accepted gallery input shapes.
///
/// `Images` is the caption-less list form: every entry gets the placeholder
/// caption. `Captioned` covers both mapping forms (image → caption and
/// filename → caption) as an ordered sequence of pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryInput {
    Images(Vec<ImageRef>),
    Captioned(Vec<(ImageRef, Option<String>)>),
}

/// A gallery artifact: mixed image/caption inputs plus the format used for
/// any generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub input: GalleryInput,
    pub format: ImageFormat,
}

impl Gallery {
    pub fn new(input: GalleryInput) -> Self {
        Self {
            input,
            format: ImageFormat::default(),
        }
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// A single figure artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub image: ImageRef,
    /// Display width in pixels; rendered as `[[File:name|<width>px]]` when set.
    pub width: Option<u32>,
    pub format: ImageFormat,
}

impl Figure {
    pub fn new(image: impl Into<ImageRef>) -> Self {
        Self {
            image: image.into(),
            width: None,
            format: ImageFormat::default(),
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// A code listing with a title and a source language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub code: String,
    pub title: String,
    pub lang: String,
}

impl CodeBlock {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: DEFAULT_CODE_TITLE.to_string(),
            lang: "text".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

/// A data table rendered as a wikitable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Optional bold label prepended to each row (the original's "index").
    pub row_labels: Option<Vec<String>>,
    /// Sortable tables get the `sortable` wikitable class. On by default.
    pub sortable: bool,
    /// CSS property/value pairs for the table's inline style.
    pub style: Vec<(String, String)>,
}

impl Table {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            row_labels: None,
            sortable: true,
            style: Vec::new(),
        }
    }

    /// Append one row of cells.
    pub fn push_row(&mut self, row: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_row_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.row_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn with_style(
        mut self,
        style: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.style = style
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }
}

/// Anything that can be registered into the notebook.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Literal markup text, passed through unmodified.
    Text(String),
    Figure(Figure),
    Table(Table),
    Code(CodeBlock),
    Gallery(Gallery),
    /// An externally defined artifact kind. Rendering requires a renderer
    /// registered under `kind`.
    Custom {
        kind: String,
        payload: serde_json::Value,
    },
}

impl Artifact {
    /// The kind tag used in dispatch and error messages.
    pub fn kind(&self) -> &str {
        match self {
            Artifact::Text(_) => "text",
            Artifact::Figure(_) => "figure",
            Artifact::Table(_) => "table",
            Artifact::Code(_) => "code",
            Artifact::Gallery(_) => "gallery",
            Artifact::Custom { kind, .. } => kind,
        }
    }
}

impl From<&str> for Artifact {
    fn from(text: &str) -> Self {
        Artifact::Text(text.to_string())
    }
}

impl From<String> for Artifact {
    fn from(text: String) -> Self {
        Artifact::Text(text)
    }
}

impl From<Table> for Artifact {
    fn from(table: Table) -> Self {
        Artifact::Table(table)
    }
}

impl From<CodeBlock> for Artifact {
    fn from(code: CodeBlock) -> Self {
        Artifact::Code(code)
    }
}

impl From<Figure> for Artifact {
    fn from(figure: Figure) -> Self {
        Artifact::Figure(figure)
    }
}

impl From<Gallery> for Artifact {
    fn from(gallery: Gallery) -> Self {
        Artifact::Gallery(gallery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_kind_names() {
        assert_eq!(Artifact::from("hi").kind(), "text");
        assert_eq!(Artifact::from(Table::new(["a"])).kind(), "table");
        assert_eq!(
            Artifact::Custom {
                kind: "chem-structure".to_string(),
                payload: serde_json::json!({}),
            }
            .kind(),
            "chem-structure"
        );
    }

    #[test]
    fn test_table_builder() {
        let mut table = Table::new(["x", "y"]);
        table.push_row(["1", "2"]);
        table.push_row(["3", "4"]);

        assert_eq!(table.columns, vec!["x", "y"]);
        assert_eq!(table.rows.len(), 2);
        assert!(table.sortable);
    }

    #[test]
    fn test_code_block_defaults() {
        let code = CodeBlock::new("print('hi')");
        assert_eq!(code.title, DEFAULT_CODE_TITLE);
        assert_eq!(code.lang, "text");
    }
}
