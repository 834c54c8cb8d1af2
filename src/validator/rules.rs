//! Per-node-type required-field checks.
//!
//! Each check produces `Error`-severity issues scoped to the offending node.
//! Dispatch is an exhaustive match over the payload union, so a new node
//! type cannot be added without deciding its rules here.

use super::report::{Issue, IssueCode};
use crate::graph::{
    ActionConfig, BodyType, ControlConfig, Graph, KeyValueEntry, Node, NodePayload, TriggerConfig,
    TriggerKind,
};
use crate::semantics::contains_reference;

/// Runs the type-specific checks for one node, appending findings to `issues`.
pub(super) fn check_node(graph: &Graph, node: &Node, issues: &mut Vec<Issue>) {
    match &node.payload {
        NodePayload::Trigger(config) => check_trigger(node, config, issues),
        NodePayload::Action(config) => check_action(node, config, issues),
        NodePayload::Transform(config) => {
            if config.expression.trim().is_empty() {
                issues.push(
                    Issue::error(
                        IssueCode::MissingInput,
                        format!("Transform node '{}' has no expression", node.id),
                    )
                    .on_node(&node.id),
                );
            }
        }
        NodePayload::Control(config) => check_control(node, config, issues),
        // Output nodes have no required configuration; format and
        // destination both default.
        NodePayload::Output(_) => {}
    }

    check_error_strategy(graph, node, issues);
}

fn check_trigger(node: &Node, config: &TriggerConfig, issues: &mut Vec<Issue>) {
    if config.kind == TriggerKind::Schedule
        && config.schedule.as_deref().unwrap_or("").trim().is_empty()
    {
        issues.push(
            Issue::error(
                IssueCode::MissingInput,
                format!("Schedule trigger '{}' has no cron expression", node.id),
            )
            .on_node(&node.id),
        );
    }
}

fn check_action(node: &Node, config: &ActionConfig, issues: &mut Vec<Issue>) {
    if config.url.trim().is_empty() {
        issues.push(
            Issue::error(
                IssueCode::MissingInput,
                format!("Action node '{}' requires a URL", node.id),
            )
            .on_node(&node.id),
        );
    } else if !is_acceptable_url(&config.url) {
        issues.push(
            Issue::error(
                IssueCode::MissingInput,
                format!(
                    "Action node '{}' has an invalid URL: '{}'",
                    node.id, config.url
                ),
            )
            .on_node(&node.id),
        );
    }

    if config.body_type == BodyType::Json {
        match config.body.as_deref().map(str::trim) {
            None | Some("") => issues.push(
                Issue::error(
                    IssueCode::MissingInput,
                    format!(
                        "Action node '{}' declares a JSON body but provides none",
                        node.id
                    ),
                )
                .on_node(&node.id),
            ),
            // Bodies carrying variable placeholders are not parseable JSON
            // until resolution, so they pass as-is.
            Some(body) if !contains_reference(body) => {
                if let Err(err) = serde_json::from_str::<serde_json::Value>(body) {
                    issues.push(
                        Issue::error(
                            IssueCode::MissingInput,
                            format!("Action node '{}' has a malformed JSON body: {}", node.id, err),
                        )
                        .on_node(&node.id),
                    );
                }
            }
            Some(_) => {}
        }
    }

    check_entries(node, &config.headers, "header", issues);
    check_entries(node, &config.query, "query parameter", issues);
}

fn check_entries(node: &Node, entries: &[KeyValueEntry], kind: &str, issues: &mut Vec<Issue>) {
    for (index, entry) in entries.iter().enumerate() {
        if entry.enabled && entry.key.trim().is_empty() {
            issues.push(
                Issue::error(
                    IssueCode::MissingInput,
                    format!(
                        "Action node '{}' has an enabled {} at position {} with no key",
                        node.id, kind, index
                    ),
                )
                .on_node(&node.id),
            );
        }
    }
}

fn check_control(node: &Node, config: &ControlConfig, issues: &mut Vec<Issue>) {
    if config.rules.is_empty() {
        issues.push(
            Issue::error(
                IssueCode::MissingInput,
                format!("Control node '{}' has no condition rules", node.id),
            )
            .on_node(&node.id),
        );
    }
    for (index, rule) in config.rules.iter().enumerate() {
        if rule.field.trim().is_empty() {
            issues.push(
                Issue::error(
                    IssueCode::MissingInput,
                    format!(
                        "Control node '{}' rule {} compares an empty field",
                        node.id, index
                    ),
                )
                .on_node(&node.id),
            );
        }
        if rule.output_handle.trim().is_empty() {
            issues.push(
                Issue::error(
                    IssueCode::InvalidConnection,
                    format!(
                        "Control node '{}' rule {} has no output handle",
                        node.id, index
                    ),
                )
                .on_node(&node.id),
            );
        }
    }
}

fn check_error_strategy(graph: &Graph, node: &Node, issues: &mut Vec<Issue>) {
    if let crate::graph::ErrorStrategy::Fallback { node_id } = &node.error_strategy {
        if !graph.contains_node(node_id) {
            issues.push(
                Issue::error(
                    IssueCode::InvalidConnection,
                    format!(
                        "Node '{}' falls back to '{}', which is not in the graph",
                        node.id, node_id
                    ),
                )
                .on_node(&node.id),
            );
        }
    }
}

/// A URL is acceptable when it is a real absolute http(s) URL, or when it
/// carries a `{{...}}` placeholder that resolution will fill in later.
fn is_acceptable_url(url: &str) -> bool {
    if contains_reference(url) {
        return true;
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) => !host.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_acceptance() {
        assert!(is_acceptable_url("https://api.example.com/v1"));
        assert!(is_acceptable_url("http://localhost:8080"));
        assert!(is_acceptable_url("{{Trigger1.body}}"));
        assert!(is_acceptable_url("https://{{Config.host}}/path"));
        assert!(!is_acceptable_url("ftp://example.com"));
        assert!(!is_acceptable_url("not a url"));
        assert!(!is_acceptable_url("https://"));
    }
}
