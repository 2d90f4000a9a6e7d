//! Final document assembly.
//!
//! The renderer makes no ordering decisions of its own: it emits the
//! preamble in a fixed shape, then replays the content store ascending by
//! position. Two preamble profiles exist; both carry the same run facts.

use chrono::{DateTime, Local};
use labwiki_provenance::ModuleProvenance;

use crate::artifact::Table;
use crate::format;
use crate::store::ContentStore;

/// Timestamp format used in the information block.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Which preamble shape the document opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreambleStyle {
    /// Category tags followed by an `=Information=` heading and a wikitable
    /// of run facts. The default.
    #[default]
    Categories,
    /// Category tags followed by a `{{LabNotebook}}` template invocation
    /// carrying the same run facts as named parameters.
    TemplateTag,
}

/// Facts about one run, captured at construction and finalized at render.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub directory: String,
    pub host: String,
    pub runtime_version: String,
}

/// Everything the renderer needs besides the content itself.
#[derive(Debug, Clone)]
pub struct Preamble {
    pub categories: Vec<String>,
    pub style: PreambleStyle,
    pub info: RunInfo,
}

/// Assemble the final document text.
///
/// Order is fixed: category tags (input order), the information block, then
/// every stored fragment ascending by position, separated by single line
/// breaks. Nothing is reordered, filtered, or deduplicated here.
pub fn render_document(
    preamble: &Preamble,
    provenance: &[ModuleProvenance],
    store: &ContentStore,
) -> String {
    let mut parts: Vec<String> = preamble
        .categories
        .iter()
        .map(|name| format::category(name))
        .collect();

    match preamble.style {
        PreambleStyle::Categories => {
            parts.push(format!(
                "=Information=\n\n{}",
                format::table(&info_table(&preamble.info, provenance))
            ));
        }
        PreambleStyle::TemplateTag => {
            parts.push(template_tag(&preamble.info, provenance));
        }
    }

    for (_, fragment) in store.iter_ordered() {
        parts.push(fragment.to_string());
    }

    parts.join("\n")
}

fn running_time(info: &RunInfo) -> String {
    format!(
        "{} - {}",
        info.start.format(TIME_FORMAT),
        info.end.format(TIME_FORMAT)
    )
}

fn library_list(provenance: &[ModuleProvenance]) -> String {
    provenance
        .iter()
        .map(|module| {
            let summary = module.summary();
            if summary.is_empty() {
                format!("* {}", module.name)
            } else {
                format!("* {} {}", module.name, summary)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn info_table(info: &RunInfo, provenance: &[ModuleProvenance]) -> Table {
    let mut table = Table::new(["Settings"]).with_row_labels([
        "Running time",
        "Running Directory",
        "Host",
        "Runtime version",
        "Libraries",
    ]);
    table.push_row([running_time(info)]);
    table.push_row([info.directory.clone()]);
    table.push_row([info.host.clone()]);
    table.push_row([info.runtime_version.clone()]);
    table.push_row([format!("\n{}", library_list(provenance))]);
    table
}

fn template_tag(info: &RunInfo, provenance: &[ModuleProvenance]) -> String {
    format!(
        "{{{{LabNotebook\n\
         | start = {start}\n\
         | end = {end}\n\
         | directory = {directory}\n\
         | host = {host}\n\
         | runtime = {runtime}\n\
         | libraries =\n{libraries}\n\
         }}}}",
        start = info.start.format(TIME_FORMAT),
        end = info.end.format(TIME_FORMAT),
        directory = info.directory,
        host = info.host,
        runtime = info.runtime_version,
        libraries = library_list(provenance),
    )
}
