//! Multi-pass document composition.
//!
//! The table of contents lists page numbers that are only known once the
//! body has been paginated, and the body's final page numbers in turn shift
//! by however many pages the table of contents itself occupies. Three passes
//! resolve the forward reference:
//!
//! 1. a body-only pass learns the page every heading lands on,
//! 2. a catalog-only pass learns how many pages the table of contents needs,
//! 3. the final pass writes title, offset-corrected catalog, and body.
//!
//! The first two passes record in memory and are dropped at scope end; only
//! the final pass's canvas is kept.

use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::model::Directive;
use crate::render::{Canvas, HeadingEntry, PageWriter, RecordingCanvas, RenderOptions};

/// Compose a document and write it to `output`.
pub fn compose_into(
    directives: &[Directive],
    title: &str,
    options: &RenderOptions,
    output: impl AsRef<Path>,
) -> Result<()> {
    let canvas = RecordingCanvas::with_output(title, output);
    let mut writer = final_pass(directives, title, options, canvas);
    writer.save()
}

/// Compose a document and return the final recording without saving it.
pub fn compose(
    directives: &[Directive],
    title: &str,
    options: &RenderOptions,
) -> Result<RecordingCanvas> {
    let canvas = RecordingCanvas::in_memory(title);
    let writer = final_pass(directives, title, options, canvas);
    let (canvas, _) = writer.into_parts();
    Ok(canvas)
}

fn final_pass(
    directives: &[Directive],
    title: &str,
    options: &RenderOptions,
    canvas: RecordingCanvas,
) -> PageWriter<RecordingCanvas> {
    let heading_table = body_pass(directives, title, options);
    let offset = catalog_pass(&heading_table, title, options);

    let mut writer = PageWriter::new(canvas, options.clone());
    writer.write_title(title);
    writer.write_catalog(&heading_table, offset);
    write_body(&mut writer, directives, true);
    writer
}

/// Pass 1: paginate the body alone to learn every heading's page.
fn body_pass(directives: &[Directive], title: &str, options: &RenderOptions) -> Vec<HeadingEntry> {
    let mut writer = PageWriter::new(RecordingCanvas::in_memory(title), options.clone());
    writer.write_title(title);
    write_body(&mut writer, directives, false);
    debug!(
        "body pass: {} pages, {} headings",
        writer.page_number(),
        writer.heading_table().len()
    );
    let (_, heading_table) = writer.into_parts();
    heading_table
}

/// Pass 2: paginate the catalog alone to learn how many pages it shifts the
/// body by.
fn catalog_pass(heading_table: &[HeadingEntry], title: &str, options: &RenderOptions) -> usize {
    let mut writer = PageWriter::new(RecordingCanvas::in_memory(title), options.clone());
    writer.write_title(title);
    writer.write_catalog(heading_table, 0);
    let offset = writer.page_number() - 1;
    debug!("catalog pass: page offset {}", offset);
    offset
}

fn write_body<C: Canvas>(
    writer: &mut PageWriter<C>,
    directives: &[Directive],
    colored: bool,
) {
    for directive in directives {
        match directive {
            Directive::Heading { level, text } => writer.write_heading(*level, text, colored),
            Directive::Content { line } => writer.write_content(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{flatten, ROOT};
    use crate::parser::parse_str;
    use crate::render::DrawCommand;

    fn sample_directives() -> Vec<Directive> {
        let tree = parse_str("第一章：\n\t正文内容\n\t小节：\n\t\t更多内容\n\n").unwrap();
        assert_eq!(tree.node(ROOT).children.len(), 1);
        flatten(&tree)
    }

    #[test]
    fn test_final_document_layout() {
        let directives = sample_directives();
        let canvas = compose(&directives, "样例", &RenderOptions::default()).unwrap();

        // Title page, catalog page, body page.
        assert_eq!(canvas.page_count(), 3);
    }

    #[test]
    fn test_catalog_offset_applied_to_links() {
        let directives = sample_directives();
        let canvas = compose(&directives, "样例", &RenderOptions::default()).unwrap();

        // The body heading lands on page 2 of the body pass; a one-page
        // catalog shifts it to page 3.
        let catalog_targets: Vec<String> = canvas.pages()[1]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Link { name, target, .. } if name.as_str() != "link_1" => {
                    Some(target.clone())
                }
                _ => None,
            })
            .collect();
        assert!(catalog_targets.contains(&"p3".to_string()));
    }

    #[test]
    fn test_body_pass_heading_pages() {
        let directives = sample_directives();
        let table = body_pass(&directives, "样例", &RenderOptions::default());
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].page, 2);
        assert_eq!(table[0].level, 1);
        assert_eq!(table[1].level, 2);
    }

    #[test]
    fn test_catalog_pass_counts_catalog_pages() {
        let table = body_pass(&sample_directives(), "样例", &RenderOptions::default());
        let offset = catalog_pass(&table, "样例", &RenderOptions::default());
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_multi_page_catalog_grows_offset() {
        // Enough level-1 sections that the catalog itself spans two pages.
        let mut text = String::new();
        for i in 0..60 {
            text.push_str(&format!("第{}章：\n\t内容\n", i));
        }
        text.push('\n');
        let directives = flatten(&parse_str(&text).unwrap());

        let options = RenderOptions::default();
        let table = body_pass(&directives, "长文", &options);
        let offset = catalog_pass(&table, "长文", &options);
        assert!(offset >= 2);

        let canvas = compose(&directives, "长文", &options).unwrap();
        assert!(canvas.page_count() > 60);
    }
}
