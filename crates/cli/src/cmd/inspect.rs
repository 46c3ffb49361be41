use mdwrangle_core::{DocumentStore, discover};
use std::path::Path;

use super::output::{InspectOutput, print_documents, print_json};
use super::{load_config, open_store};
use crate::InspectArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: InspectArgs) {
    let rc = load_config(config, profile);
    let store = open_store(&rc);

    let scope = args.scope.unwrap_or_default();
    let records = match store.query(&scope) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error reading documents: {e}");
            std::process::exit(1);
        }
    };
    let discovery = discover(&records);

    if args.json {
        print_json(&InspectOutput::new(&records, &discovery));
    } else {
        print_documents(&records, &discovery);
    }
}
