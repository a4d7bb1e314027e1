pub mod overrides;
pub mod rows;
pub mod sections;
pub mod text;

use scraper::Html;

use crate::model::FunctionDescriptor;

/// Two-pass pipeline: HTML text → DOM → function descriptors in page order.
pub fn parse_reference(html: &str, start_marker: &str) -> Vec<FunctionDescriptor> {
    let doc = Html::parse_document(html);
    sections::walk_headings(&doc, start_marker)
}
