//! The `coursecheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coursecheck_core::catalog::{
    load_answers, load_catalog, validate_answers, validate_catalog, ValidationWarning,
};

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}

pub fn execute(catalog_path: Option<PathBuf>, answers_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    println!("Catalog: {} ({} questions)", catalog.name, catalog.len());

    let warnings = validate_catalog(&catalog);
    print_warnings(&warnings);
    let mut total_warnings = warnings.len();

    if let Some(path) = answers_path {
        let sheet = load_answers(&path)?;
        println!("Answers: {} ({} answers)", path.display(), sheet.len());

        let warnings = validate_answers(&catalog, sheet.answers());
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All checks passed.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
