use super::{read_document, resolve, write_file};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::DocumentModel;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page document (JSON)
    pub input: String,

    /// Page title, also used for the file name
    #[arg(short, long, default_value = "Landing Page")]
    pub title: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = read_document(&resolve(cwd, &args.input))?;

    let model = DocumentModel::from_document(document).with_compile_options(config.compile_options());
    let page = model.export_page(&args.title);

    let output = resolve(cwd, &args.out_dir).join(&page.file_name);
    debug!(file = %page.file_name, title = %args.title, "Exporting page");
    write_file(&output, page.as_bytes())?;

    println!(
        "  {} Exported {} ({}, {} bytes)",
        "✓".green(),
        output.display(),
        page.mime_type,
        page.contents.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::{ComponentDescriptor, Document};
    use std::fs;

    #[test]
    fn test_export_writes_standalone_page() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        let mut page = Document::with_components(vec![ComponentDescriptor::text("Hello")]);
        page.css = "p { color: red; }".into();
        fs::write(dir.path().join("page.json"), page.to_json_pretty().unwrap()).unwrap();

        export(
            ExportArgs {
                input: "page.json".into(),
                title: "Summer Sale".into(),
                out_dir: "dist".into(),
            },
            cwd,
        )
        .unwrap();

        let html = fs::read_to_string(dir.path().join("dist").join("summer-sale.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Summer Sale</title>"));
        assert!(html.contains("p { color: red; }"));
        assert!(html.contains("<p class=\"text-block\">Hello</p>"));
    }
}
