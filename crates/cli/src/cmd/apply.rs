//! Apply command implementation.

use std::path::Path;

use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use mdwrangle_core::edits::EditPlan;
use mdwrangle_core::{
    BatchReport, DocumentStore, EditSet, MemoryStore, Options, PropertyAction, TagAction,
    UserAction, process,
};

use super::output::{print_json, print_plan, print_report};
use super::{load_config, open_store};
use crate::ApplyArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ApplyArgs) {
    let rc = load_config(config, profile);

    let plan = match &args.plan {
        Some(path) => match EditPlan::load(path) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => EditPlan::default(),
    };

    let edits = fold_flags(plan.edits, &args);
    let options = Options {
        convert_keys_to_lowercase: rc.wrangle.convert_keys_to_lowercase
            || plan.options.convert_keys_to_lowercase
            || args.lowercase_keys,
        sync_relationship_lists: rc.wrangle.sync_relationship_lists
            || plan.options.sync_relationship_lists
            || args.sync_links,
    };

    if edits.is_empty() && !options.convert_keys_to_lowercase && !options.sync_relationship_lists {
        println!("Nothing to do.");
        return;
    }
    if let Err(e) = edits.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut store = open_store(&rc);
    let scope = args.scope.clone().unwrap_or_default();
    let documents = match store.query(&scope) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("Error reading documents: {e}");
            std::process::exit(1);
        }
    };

    if !args.json {
        print_plan(&edits, options);
        println!();
    }

    let report = if args.dry_run {
        let mut preview = match MemoryStore::snapshot(&store, &scope) {
            Ok(preview) => preview,
            Err(e) => {
                eprintln!("Error reading documents: {e}");
                std::process::exit(1);
            }
        };
        run_batch(&mut preview, &documents, &edits, options)
    } else {
        if !args.yes && !confirm(documents.len()) {
            println!("Cancelled.");
            return;
        }
        run_batch(&mut store, &documents, &edits, options)
    };

    if args.json {
        print_json(&report);
    } else {
        print_report(&report);
        if args.dry_run {
            println!();
            println!("(dry-run mode - no changes made)");
        }
    }

    if report.has_failures() {
        crate::logging::shutdown();
        std::process::exit(1);
    }
}

/// Fold command-line edits into the plan. Flags win over plan entries for
/// the same name.
fn fold_flags(edits: EditSet, args: &ApplyArgs) -> EditSet {
    let property = |name: &String, action: PropertyAction| UserAction::SetProperty {
        name: name.clone(),
        action,
    };

    let renames = args
        .rename_property
        .iter()
        .map(|(from, to)| property(from, PropertyAction::Rename { to: to.clone() }));
    let deletes = args.delete_property.iter().map(|n| property(n, PropertyAction::Delete));
    let inline = args.inline_property.iter().map(|n| property(n, PropertyAction::TurnInline));
    let frontmatter =
        args.frontmatter_property.iter().map(|n| property(n, PropertyAction::TurnFrontmatter));
    let tag_deletes = args
        .delete_tag
        .iter()
        .map(|t| UserAction::SetTag { tag: t.clone(), action: TagAction::Delete });
    let tag_adds =
        args.add_tag.iter().map(|t| UserAction::SetTag { tag: t.clone(), action: TagAction::Add });

    renames
        .chain(deletes)
        .chain(inline)
        .chain(frontmatter)
        .chain(tag_deletes)
        .chain(tag_adds)
        .fold(edits, EditSet::reduce)
}

fn run_batch<S: DocumentStore>(
    store: &mut S,
    documents: &[mdwrangle_core::DocumentRecord],
    edits: &EditSet,
    options: Options,
) -> BatchReport {
    match process(store, documents, edits, options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn confirm(count: usize) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Edit {count} files?"))
        .default(false)
        .interact()
        .unwrap_or(false)
}
