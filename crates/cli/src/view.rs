use grail_groovy::resolve::{Applicability, ResolveResult};
use tabled::Tabled;

/// One resolve result of a call site.
#[derive(Tabled)]
pub struct ResultRow {
    #[tabled(rename = "Call")]
    pub call: String,
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Constructor")]
    pub constructor: String,
    #[tabled(rename = "Applicable")]
    pub applicable: &'static str,
}

impl ResultRow {
    pub fn new(call: u32, result: &ResolveResult) -> Self {
        Self {
            call: call.to_string(),
            class: result.class_fqn.clone(),
            constructor: result
                .constructor
                .as_ref()
                .map(|c| c.signature())
                .unwrap_or_else(|| "<default>".to_string()),
            applicable: match result.applicability {
                Applicability::Applicable => "yes",
                Applicability::Unknown => "?",
            },
        }
    }
}

/// One call site in `grail check`.
#[derive(Tabled)]
pub struct CheckRow {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Call")]
    pub call: u32,
    #[tabled(rename = "Type")]
    pub type_name: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
}
