//! The `coursecheck questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use coursecheck_core::catalog::load_catalog;
use coursecheck_core::model::{Category, QuestionKind};

pub fn execute(catalog_path: Option<PathBuf>, category: Option<String>) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let filter: Option<Category> = category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category", "Type", "Weight", "Question", "Answers"]);

    let mut shown = 0usize;
    for q in catalog
        .questions
        .iter()
        .filter(|q| filter.map_or(true, |c| q.category == c))
    {
        let answers = match &q.kind {
            QuestionKind::YesNo => "yes / no".to_string(),
            QuestionKind::Scale { min, max, .. } => format!("{min}..{max}"),
            QuestionKind::MultipleChoice { options } => options.join(" / "),
        };
        table.add_row(vec![
            Cell::new(&q.id),
            Cell::new(q.category),
            Cell::new(q.kind.type_name()),
            Cell::new(q.weight),
            Cell::new(&q.text),
            Cell::new(answers),
        ]);
        shown += 1;
    }

    println!("{} ({} questions)", catalog.name, catalog.len());
    println!("{table}");
    if filter.is_some() {
        println!("{shown} question(s) shown.");
    }

    Ok(())
}
