//! Content-tree scaffolding for `dox init`.
//!
//! Creates the three collection directories and a starter doc page so a
//! fresh repository validates cleanly. Idempotent: existing directories and
//! files are left alone.

use anyhow::Result;

use crate::collection::Collection;
use crate::config::Config;

const STARTER_PAGE: &str = r#"---
title: Getting Started
description: How content moves through this site's three-tier pipeline.
category: meta
sidebar: true
---

# Getting Started

Content flows through three collections:

1. **brain-dumps/** — raw captures (audio transcripts, pasted notes).
2. **staging/** — discrete topics extracted from dumps, carrying review
   state (`new` → `reviewed` → `ready` → `integrated`).
3. **docs/** — canonical published pages.

Run `dox check` before committing; it validates every file's frontmatter
and the cross-references between collections.
"#;

pub fn run_init(config: &Config) -> Result<()> {
    let mut created_dirs = 0;
    for c in Collection::ALL {
        let dir = c.dir(config);
        if !dir.is_dir() {
            std::fs::create_dir_all(&dir)?;
            created_dirs += 1;
        }
    }

    let starter = Collection::Docs.dir(config).join("getting-started.mdx");
    let mut created_starter = false;
    if !starter.exists() {
        std::fs::write(&starter, STARTER_PAGE)?;
        created_starter = true;
    }

    println!("init {}", config.content.root.display());
    println!("  directories created: {}", created_dirs);
    if created_starter {
        println!("  starter page: {}", starter.display());
    }
    println!("ok");
    Ok(())
}
