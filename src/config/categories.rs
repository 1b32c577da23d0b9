//! Filesystem-derived entry categories.
//!
//! Every module directory, precompile directory and outpost directory in the
//! repository becomes an allowed category (`<module>`, `<name>-precompile`,
//! `<name>-outpost`) on top of the seed list.
use log::*;
use std::{collections::BTreeSet, fs, path::Path};

use crate::{config::CategorySources, error::Result};

/// Build the allowed category set for a repository rooted at `repo_root`.
///
/// Missing source directories are skipped so the linter can run against
/// changelogs outside of a full checkout.
pub fn discover_categories(
    repo_root: &Path,
    sources: &CategorySources,
    seeds: &[String],
) -> Result<BTreeSet<String>> {
    let mut categories: BTreeSet<String> = seeds.iter().cloned().collect();

    for module in subdirectories(&repo_root.join(&sources.module_dir))? {
        categories.insert(module);
    }

    for precompile in
        subdirectories(&repo_root.join(&sources.precompile_dir))?
    {
        categories.insert(format!("{precompile}-precompile"));
    }

    for outpost in subdirectories(&repo_root.join(&sources.outpost_dir))? {
        categories.insert(format!("{outpost}-outpost"));
    }

    debug!("discovered {} allowed categories", categories.len());

    Ok(categories)
}

fn subdirectories(path: &Path) -> Result<Vec<String>> {
    if !path.is_dir() {
        warn!(
            "category source directory not found, skipping: {}",
            path.display()
        );
        return Ok(vec![]);
    }

    let mut names = vec![];

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();

    Ok(names)
}
