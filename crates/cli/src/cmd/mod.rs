pub mod apply;
pub mod doctor;
pub mod inspect;
mod output;

use std::path::Path;

use mdwrangle_core::config::{ConfigLoader, ResolvedConfig};
use mdwrangle_core::FileStore;

/// Load the configuration and start logging, or exit.
fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc.logging);
            rc
        }
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    }
}

fn open_store(rc: &ResolvedConfig) -> FileStore {
    match FileStore::with_exclusions(&rc.vault_root, rc.excluded_folders.clone()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening vault {}: {e}", rc.vault_root.display());
            std::process::exit(1);
        }
    }
}
