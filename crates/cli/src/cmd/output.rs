//! Shared output formatting.

use mdwrangle_core::{BatchReport, Discovery, DocumentRecord, EditSet, Options, OutcomeStatus};
use mdwrangle_core::{PropertyAction, TagAction};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct DocumentRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Properties")]
    properties: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Writes")]
    writes: usize,
    #[tabled(rename = "Notes")]
    notes: String,
}

#[derive(Serialize)]
struct DocumentJson {
    path: String,
    properties: Vec<String>,
    tags: Vec<String>,
}

/// JSON shape of `inspect`.
#[derive(Serialize)]
pub struct InspectOutput<'a> {
    documents: Vec<DocumentJson>,
    #[serde(flatten)]
    discovery: &'a Discovery,
}

impl<'a> InspectOutput<'a> {
    pub fn new(records: &[DocumentRecord], discovery: &'a Discovery) -> Self {
        let documents = records
            .iter()
            .map(|record| DocumentJson {
                path: record.path.display().to_string(),
                properties: record.property_keys(),
                tags: record.tags.clone(),
            })
            .collect();
        Self { documents, discovery }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

pub fn print_documents(records: &[DocumentRecord], discovery: &Discovery) {
    if records.is_empty() {
        println!("(no documents found)");
        return;
    }

    let rows: Vec<DocumentRow> = records
        .iter()
        .map(|record| DocumentRow {
            path: record.path.display().to_string(),
            properties: record.property_keys().join(", "),
            tags: record.tags.join(" "),
        })
        .collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("Properties: {}", list_or_none(&discovery.properties));
    let tags: Vec<String> = discovery.tags.iter().map(|t| format!("#{t}")).collect();
    println!("Tags: {}", list_or_none(&tags));
    println!("\nTotal: {} documents", records.len());
}

pub fn print_plan(edits: &EditSet, options: Options) {
    println!("Planned edits:");
    for (name, action) in &edits.properties {
        let line = match action {
            PropertyAction::Delete => format!("delete property '{name}'"),
            PropertyAction::Rename { to } => format!("rename property '{name}' -> '{to}'"),
            PropertyAction::TurnInline => format!("move property '{name}' to an inline field"),
            PropertyAction::TurnFrontmatter => {
                format!("move inline field '{name}' into frontmatter")
            }
        };
        println!("  - {line}");
    }
    for (tag, action) in &edits.tags {
        match action {
            TagAction::Delete => println!("  - delete tag #{tag}"),
            TagAction::Add => println!("  - add tag #{tag}"),
        }
    }
    if options.convert_keys_to_lowercase {
        println!("  - lowercase all property keys");
    }
    if options.sync_relationship_lists {
        println!("  - sync relationship lists into frontmatter");
    }
}

pub fn print_report(report: &BatchReport) {
    let rows: Vec<OutcomeRow> = report
        .outcomes
        .iter()
        .filter(|o| o.status != OutcomeStatus::Unchanged || !o.warnings.is_empty())
        .map(|o| OutcomeRow {
            path: o.path.display().to_string(),
            status: match &o.status {
                OutcomeStatus::Unchanged => "unchanged".to_string(),
                OutcomeStatus::Updated => "updated".to_string(),
                OutcomeStatus::Failed { .. } => "failed".to_string(),
            },
            writes: o.metadata_writes + usize::from(o.text_rewritten),
            notes: match &o.status {
                OutcomeStatus::Failed { reason } => reason.clone(),
                _ => o.warnings.join("; "),
            },
        })
        .collect();

    if !rows.is_empty() {
        let table = Table::new(&rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
    println!(
        "Updated: {}, unchanged: {}, failed: {}, warnings: {}",
        report.updated(),
        report.unchanged(),
        report.failed(),
        report.warnings()
    );
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() { "(none)".to_string() } else { items.join(", ") }
}
