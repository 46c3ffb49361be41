use mdwrangle_core::DocumentStore;
use mdwrangle_core::FileStore;
use mdwrangle_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc.logging);

            println!("OK   mdw doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());

            let vault = FileStore::open(&rc.vault_root)
                .and_then(|store| store.check_available().map(|()| store));
            match vault {
                Ok(store) => println!("vault: ok ({})", store.root().display()),
                Err(e) => println!("vault: unavailable ({e})"),
            }

            for folder in &rc.excluded_folders {
                println!("excluded: {}", folder.display());
            }
            println!("logging.level: {}", rc.logging.level);
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
            let defaults = rc.wrangle;
            println!("wrangle.convert_keys_to_lowercase: {}", defaults.convert_keys_to_lowercase);
            println!("wrangle.sync_relationship_lists: {}", defaults.sync_relationship_lists);
            tracing::debug!("doctor finished for profile '{}'", rc.active_profile);
        }
        Err(e) => {
            println!("FAIL mdw doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
