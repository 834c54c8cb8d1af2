//! `{{nodeId.fieldName}}` variable references.
//!
//! String fields anywhere in a node payload may embed references to an
//! upstream node's output fields. Design-time validation only checks that
//! the referenced node exists; type compatibility of the field is a
//! presentation concern left to the editor. Resolution against recorded
//! outputs happens at execution time.

use crate::graph::Graph;
use ahash::AHashMap;
use serde_json::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// True if the string contains at least one complete `{{...}}` span.
pub fn contains_reference(input: &str) -> bool {
    match input.find(OPEN) {
        Some(start) => input[start + OPEN.len()..].contains(CLOSE),
        None => false,
    }
}

/// Extracts the interior text of every `{{...}}` span, in order of
/// appearance, whitespace-trimmed. A plain scan, by contract: no regex.
pub fn extract_references(input: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        match after_open.find(CLOSE) {
            Some(end) => {
                references.push(after_open[..end].trim().to_string());
                rest = &after_open[end + CLOSE.len()..];
            }
            // Unterminated span; nothing further can close.
            None => break,
        }
    }
    references
}

/// Returns the references whose leading dotted segment matches no node id in
/// the graph. A reference without a dot is checked as a whole id.
pub fn validate_references(input: &str, graph: &Graph) -> Vec<String> {
    extract_references(input)
        .into_iter()
        .filter(|reference| {
            let node_id = reference.split('.').next().unwrap_or(reference);
            !graph.contains_node(node_id)
        })
        .collect()
}

/// The append-only map of recorded node outputs, keyed by node id and then
/// output field name.
pub type OutputMap = AHashMap<String, AHashMap<String, Value>>;

/// Substitutes every resolvable reference with the recorded output value.
///
/// References to nodes or fields with no recorded output are left verbatim:
/// design-time validation already reported genuinely missing nodes, and the
/// executor may be running a knowingly partial graph.
pub fn resolve_variables(input: &str, outputs: &OutputMap) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        let reference = after_open[..end].trim();
        let replacement = lookup(reference, outputs);
        result.push_str(&rest[..start]);
        match replacement {
            Some(value) => result.push_str(&render(value)),
            None => result.push_str(&rest[start..start + OPEN.len() + end + CLOSE.len()]),
        }
        rest = &after_open[end + CLOSE.len()..];
    }
    result.push_str(rest);
    result
}

fn lookup<'a>(reference: &str, outputs: &'a OutputMap) -> Option<&'a Value> {
    let (node_id, field) = reference.split_once('.')?;
    outputs.get(node_id)?.get(field)
}

/// Strings substitute without quotes; everything else uses its JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
