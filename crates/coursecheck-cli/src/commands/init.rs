//! The `coursecheck init` command.

use std::path::Path;

use anyhow::{Context, Result};

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("coursecheck.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("answers/example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Answer the questions listed by: coursecheck questions");
    println!("  2. Run: coursecheck validate --answers answers/example.toml");
    println!("  3. Run: coursecheck assess --answers answers/example.toml --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# coursecheck configuration

# TOML catalog replacing the built-in questionnaire
# catalog = "${HOME}/catalogs/course.toml"

output_dir = "./coursecheck-results"

# Log per-answer scoring steps at trace level (RUST_LOG=coursecheck=trace)
trace_scoring = false

# Refuse to score answer sheets with unknown questions or invalid values
strict = false
"#;

const EXAMPLE_ANSWERS: &str = r#"# Answers for the built-in questionnaire.
# Yes/no questions take "yes" or "no", scales take a number,
# multiple-choice questions take one of the listed options.

[[answers]]
question_id = "color-contrast"
value = "yes"

[[answers]]
question_id = "images-alt-text"
value = "no"

[[answers]]
question_id = "font-readability"
value = 4

[[answers]]
question_id = "video-captions"
value = "no"

[[answers]]
question_id = "keyboard-navigation"
value = "yes"

[[answers]]
question_id = "clear-navigation"
value = 3

[[answers]]
question_id = "forms-labels"
value = "yes"

[[answers]]
question_id = "assistive-tech-testing"
value = "Planning to test"
"#;
