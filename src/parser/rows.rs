use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::overrides;
use super::text::{flatten_text, normalize_type};
use crate::model::{Parameter, ReturnValue};

static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

/// What the rows under the current header describe. Starts unset; rows seen
/// before any recognized header carry no information and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowMode {
    Unset,
    Params,
    Returns,
}

impl RowMode {
    /// Header text steers the mode; anything that names neither parameters
    /// nor returns leaves the current mode in place.
    fn from_header(text: &str) -> Option<RowMode> {
        let lower = text.to_lowercase();
        if lower.contains("parameters") {
            Some(RowMode::Params)
        } else if lower.contains("returns") {
            Some(RowMode::Returns)
        } else {
            None
        }
    }
}

/// Walk every row of one signature table and classify it under the active
/// mode. The mode resets with each table. `function` is the sanitized owner
/// name, used to look up manual type corrections.
pub fn classify_rows(table: ElementRef, function: &str) -> (Vec<Parameter>, Vec<ReturnValue>) {
    let mut params = Vec::new();
    let mut returns = Vec::new();
    let mut mode = RowMode::Unset;

    for row in table.select(&TR) {
        // Header rows only steer the mode; they never produce entries.
        if let Some(th) = row.select(&TH).next() {
            if let Some(next) = RowMode::from_header(&flatten_text(&th)) {
                mode = next;
            }
            continue;
        }

        let cells: Vec<ElementRef> = row.select(&TD).collect();
        if cells.is_empty() {
            continue;
        }
        let first = cells[0];
        let last = cells[cells.len() - 1];

        match mode {
            RowMode::Params => {
                if let Some(p) = parse_param_cell(first, last, function) {
                    params.push(p);
                }
            }
            RowMode::Returns => {
                // The description column only counts when it is a separate cell.
                let desc = if cells.len() > 1 { Some(last) } else { None };
                returns.push(parse_return_cell(first, desc));
            }
            RowMode::Unset => {}
        }
    }

    (params, returns)
}

/// Span texts inside a cell, in document order. These encode name, type and
/// the REQUIRED flag on the reference page.
fn sub_labels(cell: ElementRef) -> Vec<String> {
    cell.select(&SPAN).map(|s| flatten_text(&s)).collect()
}

/// Classify one parameter row. The first cell carries the name/type spans,
/// `desc` is the row's last cell. Returns None when the cell has neither
/// spans nor text to take a name from.
fn parse_param_cell(first: ElementRef, desc: ElementRef, function: &str) -> Option<Parameter> {
    let labels = sub_labels(first);

    let name = match labels.first() {
        Some(label) => label.clone(),
        None => flatten_text(&first).split_whitespace().next()?.to_string(),
    };

    let declared = labels
        .get(1)
        .filter(|l| !l.eq_ignore_ascii_case("REQUIRED"))
        .map(String::as_str);
    let required = labels.iter().any(|l| l.to_uppercase().contains("REQUIRED"));

    let ty = match overrides::type_override(function, &name) {
        Some(forced) => forced.to_string(),
        None => normalize_type(declared),
    };

    Some(Parameter {
        name,
        ty,
        required,
        description: flatten_text(&desc),
    })
}

/// Classify one return row. The type is normalized but the name is kept
/// verbatim; the page capitalizes record types while names stay lowercase.
fn parse_return_cell(first: ElementRef, desc: Option<ElementRef>) -> ReturnValue {
    let labels = sub_labels(first);

    let (name, ty) = if labels.len() >= 2 {
        (labels[0].clone(), normalize_type(Some(&labels[1])))
    } else {
        let text = flatten_text(&first);
        let mut tokens = text.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(name), Some(ty)) => (name.to_string(), normalize_type(Some(ty))),
            _ => {
                let name = if text.is_empty() { "result".to_string() } else { text };
                (name, "any".to_string())
            }
        }
    };

    ReturnValue {
        name,
        ty,
        description: desc.map(|d| flatten_text(&d)).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn classify(table_html: &str, function: &str) -> (Vec<Parameter>, Vec<ReturnValue>) {
        let doc = Html::parse_fragment(table_html);
        let table = doc
            .select(&Selector::parse("table").unwrap())
            .next()
            .expect("test fragment must contain a table");
        classify_rows(table, function)
    }

    #[test]
    fn required_span_forces_any_type() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>vars</span> <span>REQUIRED</span></td><td>Extra vars.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "vars");
        assert_eq!(params[0].ty, "any");
        assert!(params[0].required);
        assert_eq!(params[0].description, "Extra vars.");
    }

    #[test]
    fn typed_span_without_required_is_optional() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>limit</span> <span>number</span></td><td>Max entries.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params[0].name, "limit");
        assert_eq!(params[0].ty, "number");
        assert!(!params[0].required);
    }

    #[test]
    fn required_alongside_type_keeps_type() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>user_id</span> <span>string</span> <span>REQUIRED</span></td>\
                   <td>The id.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params[0].ty, "string");
        assert!(params[0].required);
    }

    #[test]
    fn override_beats_scraped_type() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>value</span> <span>string</span> <span>REQUIRED</span></td>\
                   <td>Value to encode.</td></tr>\
             </table>",
            "json_encode",
        );
        assert_eq!(params[0].name, "value");
        assert_eq!(params[0].ty, "any");
    }

    #[test]
    fn param_without_spans_takes_first_token() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td>cursor An optional cursor.</td><td>Pagination cursor.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params[0].name, "cursor");
        assert_eq!(params[0].ty, "any");
        assert!(!params[0].required);
    }

    #[test]
    fn empty_param_cell_is_dropped() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td></td></tr>\
             </table>",
            "some_fn",
        );
        assert!(params.is_empty());
    }

    #[test]
    fn return_spans_keep_name_verbatim_and_lowercase_type() {
        let (_, returns) = classify(
            "<table>\
               <tr><th>Returns</th></tr>\
               <tr><td><span>account</span> <span>Account</span></td><td>All the data.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].name, "account");
        assert_eq!(returns[0].ty, "account");
        assert_eq!(returns[0].description, "All the data.");
    }

    #[test]
    fn return_without_spans_splits_text() {
        let (_, returns) = classify(
            "<table>\
               <tr><th>Returns</th></tr>\
               <tr><td>output string</td><td>Encoded value.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(returns[0].name, "output");
        assert_eq!(returns[0].ty, "string");
    }

    #[test]
    fn single_token_return_keeps_text_as_name() {
        let (_, returns) = classify(
            "<table>\
               <tr><th>Returns</th></tr>\
               <tr><td>Account</td><td>The account.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(returns[0].name, "Account");
        assert_eq!(returns[0].ty, "any");
    }

    #[test]
    fn empty_return_cell_defaults_to_result() {
        let (_, returns) = classify(
            "<table>\
               <tr><th>Returns</th></tr>\
               <tr><td></td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(returns[0].name, "result");
        assert_eq!(returns[0].ty, "any");
        assert_eq!(returns[0].description, "");
    }

    #[test]
    fn header_switches_mode_midway() {
        let (params, returns) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>key</span> <span>string</span></td><td>The key.</td></tr>\
               <tr><th>Returns</th></tr>\
               <tr><td><span>value</span> <span>string</span></td><td>The value.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "key");
        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].name, "value");
    }

    #[test]
    fn rows_before_any_header_are_ignored() {
        let (params, returns) = classify(
            "<table>\
               <tr><td><span>stray</span></td><td>No header yet.</td></tr>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>real</span> <span>number</span></td><td>Counted.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "real");
        assert!(returns.is_empty());
    }

    #[test]
    fn unrecognized_header_keeps_current_mode() {
        let (params, _) = classify(
            "<table>\
               <tr><th>Parameters</th></tr>\
               <tr><td><span>a</span> <span>string</span></td><td>First.</td></tr>\
               <tr><th>Example</th></tr>\
               <tr><td><span>b</span> <span>string</span></td><td>Second.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn header_detection_is_case_insensitive() {
        let (params, returns) = classify(
            "<table>\
               <tr><th>PARAMETERS</th></tr>\
               <tr><td><span>a</span></td><td>A.</td></tr>\
               <tr><th>returns</th></tr>\
               <tr><td>out string</td><td>Out.</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(params.len(), 1);
        assert_eq!(returns.len(), 1);
    }

    #[test]
    fn single_cell_return_row_has_no_description() {
        let (_, returns) = classify(
            "<table>\
               <tr><th>Returns</th></tr>\
               <tr><td>ok bool</td></tr>\
             </table>",
            "some_fn",
        );
        assert_eq!(returns[0].name, "ok");
        assert_eq!(returns[0].ty, "bool");
        assert_eq!(returns[0].description, "");
    }
}
