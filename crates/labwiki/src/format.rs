//! Wiki-markup emitters and the artifact formatter registry.
//!
//! The built-in artifact kinds are dispatched by exhaustive match; custom
//! kinds are looked up in an open side table populated through
//! [`FormatterRegistry::register`]. Literal text always renders through the
//! identity, unconditionally.

use std::collections::HashMap;
use std::path::Path;

use crate::artifact::{Artifact, CodeBlock, Figure, Table};
use crate::error::{LogError, LogResult};
use crate::gallery;

/// `[[Category:name]]` tag line.
pub fn category(name: &str) -> String {
    format!("[[Category:{name}]]")
}

/// `[[File:name]]` link, optionally with a pixel width.
pub fn file_link(name: &str, width: Option<u32>) -> String {
    match width {
        Some(px) => format!("[[File:{name}|{px}px]]"),
        None => format!("[[File:{name}]]"),
    }
}

/// `[[Media:name]]` link.
pub fn media_link(name: &str) -> String {
    format!("[[Media:{name}]]")
}

/// Convert a column of filenames into file links.
pub fn file_links(col: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    col.into_iter()
        .map(|name| file_link(name.as_ref(), None))
        .collect()
}

/// Convert a column of filenames into media links.
pub fn media_links(col: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    col.into_iter().map(|name| media_link(name.as_ref())).collect()
}

/// Render a code listing as a collapsible block with a language icon,
/// title, and `<source>` body.
pub fn code_block(code: &CodeBlock) -> String {
    format!(
        "<div class=\"toccolours mw-collapsible mw-collapsed\">\n\
         [[File:{lang}.png|40px]] '''{title}'''\n\
         <div class=\"mw-collapsible-content\">\n\
         <source lang=\"{lang}\">\n\
         {code}\n\
         </source>\n\
         </div>\n\
         </div>",
        lang = code.lang,
        title = code.title,
        code = code.code,
    )
}

/// Render a table as a wikitable, sortable by default.
///
/// Row labels, when present, occupy a leading unlabeled header column and
/// are set in bold.
pub fn table(t: &Table) -> String {
    let class = if t.sortable {
        "wikitable sortable"
    } else {
        "wikitable"
    };
    let style = if t.style.is_empty() {
        String::from("\"\"")
    } else {
        let pairs: Vec<String> = t.style.iter().map(|(k, v)| format!("{k}:{v}")).collect();
        format!("\"{};\"", pairs.join(";"))
    };

    let mut header = t.columns.join(" !! ");
    if t.row_labels.is_some() {
        header = format!(" !! {header}");
    }

    let mut s = vec![format!("{{| class=\"{class}\" style={style}\n|-\n! {header}")];
    for (i, row) in t.rows.iter().enumerate() {
        let mut cells: Vec<String> = Vec::with_capacity(row.len() + 1);
        if let Some(labels) = &t.row_labels {
            let label = labels.get(i).map(String::as_str).unwrap_or("");
            cells.push(format!("'''{label}'''"));
        }
        cells.extend(row.iter().cloned());
        s.push(format!("|-\n| {}", cells.join(" || ")));
    }
    s.push("|}".to_string());
    s.join("\n")
}

/// Renderer for a custom artifact kind.
pub type CustomRenderer = Box<dyn Fn(&serde_json::Value) -> String + Send + Sync>;

/// Maps artifact kinds to renderers.
///
/// Built-in kinds are handled by exhaustive match in [`render`]; the
/// registry's table only holds renderers for [`Artifact::Custom`] kinds.
#[derive(Default)]
pub struct FormatterRegistry {
    custom: HashMap<String, CustomRenderer>,
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("custom_kinds", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FormatterRegistry {
    /// Registry with no custom kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the renderer for a custom artifact kind.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        renderer: impl Fn(&serde_json::Value) -> String + Send + Sync + 'static,
    ) {
        self.custom.insert(kind.into(), Box::new(renderer));
    }

    /// Whether a renderer is registered for a custom kind.
    pub fn supports(&self, kind: &str) -> bool {
        self.custom.contains_key(kind)
    }

    /// Render an artifact to a markup fragment.
    ///
    /// `image_dir` is where figures and galleries materialize any in-memory
    /// images. Fails with [`LogError::UnsupportedArtifact`] for a custom
    /// kind with no registered renderer.
    pub fn render(&self, artifact: Artifact, image_dir: &Path) -> LogResult<String> {
        match artifact {
            Artifact::Text(text) => Ok(text),
            Artifact::Figure(Figure {
                image,
                width,
                format,
            }) => {
                let filename = gallery::materialize(image, format, image_dir)?;
                Ok(file_link(&filename, width))
            }
            Artifact::Table(t) => Ok(table(&t)),
            Artifact::Code(c) => Ok(code_block(&c)),
            Artifact::Gallery(g) => {
                let entries = gallery::normalize(g.input, g.format, image_dir)?;
                Ok(gallery::render(&entries))
            }
            Artifact::Custom { kind, payload } => match self.custom.get(&kind) {
                Some(renderer) => Ok(renderer(&payload)),
                None => Err(LogError::UnsupportedArtifact { kind }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ImageData;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_links() {
        assert_eq!(category("example"), "[[Category:example]]");
        assert_eq!(file_link("a.png", None), "[[File:a.png]]");
        assert_eq!(file_link("a.png", Some(800)), "[[File:a.png|800px]]");
        assert_eq!(media_link("a.dat"), "[[Media:a.dat]]");
    }

    #[test]
    fn test_link_columns() {
        assert_eq!(
            file_links(["a.png", "b.png"]),
            vec!["[[File:a.png]]", "[[File:b.png]]"]
        );
        assert_eq!(media_links(["x"]), vec!["[[Media:x]]"]);
    }

    #[test]
    fn test_text_is_identity() {
        let registry = FormatterRegistry::new();
        let dir = std::env::temp_dir();
        let out = registry
            .render(Artifact::Text("== raw ==".to_string()), &dir)
            .unwrap();
        assert_eq!(out, "== raw ==");
    }

    #[test]
    fn test_table_markup() {
        let mut t = Table::new(["x", "y"]);
        t.push_row(["1", "2"]);
        t.push_row(["3", "4"]);

        assert_eq!(
            table(&t),
            "{| class=\"wikitable sortable\" style=\"\"\n\
             |-\n\
             ! x !! y\n\
             |-\n\
             | 1 || 2\n\
             |-\n\
             | 3 || 4\n\
             |}"
        );
    }

    #[test]
    fn test_table_with_row_labels_and_style() {
        let mut t = Table::new(["Settings"])
            .with_row_labels(["Host"])
            .with_style([("width", "50%")])
            .unsortable();
        t.push_row(["zeus"]);

        assert_eq!(
            table(&t),
            "{| class=\"wikitable\" style=\"width:50%;\"\n\
             |-\n\
             !  !! Settings\n\
             |-\n\
             | '''Host''' || zeus\n\
             |}"
        );
    }

    #[test]
    fn test_code_block_markup() {
        let code = CodeBlock::new("x = 1").with_title("setup").with_lang("python");
        let out = code_block(&code);
        assert!(out.starts_with("<div class=\"toccolours mw-collapsible mw-collapsed\">"));
        assert!(out.contains("[[File:python.png|40px]] '''setup'''"));
        assert!(out.contains("<source lang=\"python\">\nx = 1\n</source>"));
        assert!(out.ends_with("</div>\n</div>"));
    }

    #[test]
    fn test_figure_with_data_is_materialized() {
        let registry = FormatterRegistry::new();
        let dir = tempfile::tempdir().unwrap();
        let figure = Figure::new(ImageData::new(vec![9u8])).with_width(800);

        let out = registry
            .render(Artifact::Figure(figure), dir.path())
            .unwrap();
        assert!(out.starts_with("[[File:"));
        assert!(out.ends_with("|800px]]"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unknown_custom_kind_names_the_kind() {
        let registry = FormatterRegistry::new();
        let err = registry
            .render(
                Artifact::Custom {
                    kind: "spectrum".to_string(),
                    payload: json!({}),
                },
                &std::env::temp_dir(),
            )
            .unwrap_err();

        match err {
            LogError::UnsupportedArtifact { kind } => assert_eq!(kind, "spectrum"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_registered_custom_kind_renders() {
        let mut registry = FormatterRegistry::new();
        registry.register("note", |payload| {
            format!("''{}''", payload["text"].as_str().unwrap_or(""))
        });
        assert!(registry.supports("note"));

        let out = registry
            .render(
                Artifact::Custom {
                    kind: "note".to_string(),
                    payload: json!({"text": "remember this"}),
                },
                &std::env::temp_dir(),
            )
            .unwrap();
        assert_eq!(out, "''remember this''");
    }
}
