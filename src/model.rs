use serde::Serialize;

/// One documented function pulled off the reference page, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescriptor {
    /// Heading text as it appears on the page, anchor marker included.
    pub title: String,
    /// First paragraph between the heading and its table, when one exists.
    pub description: Option<String>,
    /// Identifier-safe name derived from the title.
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub returns: Vec<ReturnValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    pub description: String,
}

/// A single documented return value. `name` falls back to "result" when the
/// cell gives none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnValue {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}
