//! Collection health listing for `dox collections`.

use anyhow::Result;

use crate::collection::{self, Collection};
use crate::config::Config;

pub fn run_collections(config: &Config) -> Result<()> {
    println!(
        "{:<14} {:<36} {:>8}  STATUS",
        "COLLECTION", "PATH", "ENTRIES"
    );

    for c in Collection::ALL {
        let dir = c.dir(config);
        if !dir.is_dir() {
            println!(
                "{:<14} {:<36} {:>8}  MISSING (run `dox init`)",
                c.as_str(),
                dir.display().to_string(),
                "-"
            );
            continue;
        }

        // Untyped load: counts files and fence/YAML failures without
        // applying a collection schema — that's `dox check`'s job.
        let loaded = collection::load::<serde_yaml::Value>(config, c)?;
        let status = if loaded.errors.is_empty() {
            "OK".to_string()
        } else {
            format!("{} unparseable", loaded.errors.len())
        };
        println!(
            "{:<14} {:<36} {:>8}  {}",
            c.as_str(),
            dir.display().to_string(),
            loaded.entries.len(),
            status
        );
    }

    Ok(())
}
