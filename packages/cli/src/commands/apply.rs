use super::{read_document, resolve, write_file};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Document, DocumentModel, Edit};
use std::fs;
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page document (JSON)
    pub input: String,

    /// JSON array of edits, applied in order
    #[arg(short, long)]
    pub edits: String,

    /// Undo this many steps after applying
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Record all edits as a single history entry with this label
    #[arg(long)]
    pub batch: Option<String>,

    /// Output file (defaults to overwriting the input)
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = resolve(cwd, &args.input);
    let document = read_document(&input)?;

    let edits_path = resolve(cwd, &args.edits);
    let edits: Vec<Edit> = serde_json::from_str(
        &fs::read_to_string(&edits_path).with_context(|| format!("Cannot read {}", edits_path.display()))?,
    )
    .with_context(|| format!("Invalid edit list in {}", edits_path.display()))?;

    let mut model = DocumentModel::with_history_limit(document, config.history_limit)
        .with_compile_options(config.compile_options());
    run_edits(&mut model, &edits, args.batch.as_deref(), args.undo)?;

    print_history(&model);

    let output = match &args.output {
        Some(path) => resolve(cwd, path),
        None => input,
    };
    write_file(&output, model.document().to_json_pretty()?)?;

    println!();
    println!("{} Wrote {}", "✅".green(), output.display());

    Ok(())
}

/// Apply `edits`, then step back `undo` times
pub fn run_edits(model: &mut DocumentModel, edits: &[Edit], batch: Option<&str>, undo: usize) -> Result<()> {
    debug!(edits = edits.len(), batch = ?batch, undo, "Applying edit list");

    match batch {
        Some(label) => {
            model.apply_batch(label, edits)?;
        }
        None => {
            for (i, edit) in edits.iter().enumerate() {
                model
                    .apply(edit.clone())
                    .with_context(|| format!("Edit #{} ({}) failed", i + 1, edit.describe()))?;
            }
        }
    }

    for _ in 0..undo {
        if model.undo().is_none() {
            break;
        }
    }

    info!(
        version = model.version(),
        pointer = model.history().pointer(),
        len = model.history().len(),
        "Edit list applied"
    );

    Ok(())
}

fn print_history(model: &DocumentModel) {
    let history = model.history();

    println!("{}", "History".bright_blue().bold());
    for (i, entry) in history.entries().iter().enumerate() {
        let marker = if i == history.pointer() { "→".green().bold() } else { " ".normal() };
        let label = entry.label.as_deref().unwrap_or("(unlabeled)");
        println!("  {} {:>3}  {}", marker, i, summarize(label, &entry.document));
    }
}

fn summarize(label: &str, document: &Document) -> String {
    format!(
        "{} {}",
        label,
        format!(
            "[{} components, {} sections]",
            document.components.len(),
            document.sections.len()
        )
        .dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::{ComponentDescriptor, SectionDescriptor};

    fn edits() -> Vec<Edit> {
        vec![
            Edit::AddComponent {
                component: ComponentDescriptor::text("One"),
                index: None,
            },
            Edit::AddSection {
                section: SectionDescriptor::with_id("A"),
                index: None,
            },
        ]
    }

    #[test]
    fn test_each_edit_is_one_history_entry() {
        let mut model = DocumentModel::from_document(Document::new());
        run_edits(&mut model, &edits(), None, 0).unwrap();

        assert_eq!(model.history().len(), 3);
        assert_eq!(model.document().sections.len(), 1);
    }

    #[test]
    fn test_batch_is_one_history_entry() {
        let mut model = DocumentModel::from_document(Document::new());
        run_edits(&mut model, &edits(), Some("Starter content"), 0).unwrap();

        assert_eq!(model.history().len(), 2);
        assert_eq!(model.history().undo_description(), Some("Starter content"));
    }

    #[test]
    fn test_undo_past_start_stops_at_original() {
        let mut model = DocumentModel::from_document(Document::new());
        run_edits(&mut model, &edits(), None, 10).unwrap();

        assert_eq!(model.history().pointer(), 0);
        assert_eq!(*model.document(), Document::new());
    }

    #[test]
    fn test_invalid_edit_names_its_position() {
        let mut model = DocumentModel::from_document(Document::new());
        let bad = vec![Edit::RemoveSection { index: 4 }];

        let error = run_edits(&mut model, &bad, None, 0).unwrap_err();
        assert!(error.to_string().contains("Edit #1"));
        assert_eq!(model.history().len(), 1);
    }

    #[test]
    fn test_apply_command_reads_edit_file() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("page.json"), Document::new().to_json_pretty().unwrap()).unwrap();
        fs::write(
            dir.path().join("edits.json"),
            r#"[{ "op": "add_component", "component": { "type": "button", "url": "/x", "text": "Go" } }]"#,
        )
        .unwrap();

        apply(
            ApplyArgs {
                input: "page.json".into(),
                edits: "edits.json".into(),
                undo: 0,
                batch: None,
                output: Some("out.json".into()),
            },
            cwd,
        )
        .unwrap();

        let result = Document::from_json(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
        assert_eq!(result.components, vec![ComponentDescriptor::button("/x", "Go")]);
        assert!(result.html.contains("href=\"/x\""));
    }
}
