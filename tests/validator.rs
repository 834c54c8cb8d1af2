//! Validation rule coverage over whole graphs.
mod common;
use common::*;
use keiro::graph::{ActionConfig, BodyType, ControlConfig, KeyValueEntry};
use keiro::prelude::*;

#[test]
fn valid_linear_workflow_has_no_issues() {
    let report = validate(&linear_workflow());
    assert!(report.is_valid());
    assert!(report.issues.is_empty());
}

#[test]
fn validation_is_deterministic() {
    let graph = branching_workflow();
    let first = validate(&graph);
    let second = validate(&graph);
    assert_eq!(first.issues.len(), second.issues.len());
    for (a, b) in first.issues.iter().zip(second.issues.iter()) {
        assert_eq!(a.code, b.code);
        assert_eq!(a.severity, b.severity);
        assert_eq!(a.message, b.message);
        assert_eq!(a.node_id, b.node_id);
    }
}

#[test]
fn multiple_triggers_are_errors() {
    let mut graph = linear_workflow();
    graph.add_node(trigger("A2")).unwrap();
    graph.add_edge(Edge::new("A2", "B")).unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::MultipleTriggers));
}

#[test]
fn trigger_with_incoming_edge_is_an_error() {
    let mut graph = linear_workflow();
    graph.add_edge(Edge::new("B", "A")).unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());
    let issue = report
        .issues
        .iter()
        .find(|i| i.code == IssueCode::TriggerHasInput)
        .expect("trigger-has-input issue present");
    // The issue names the offending connection, not just the trigger.
    assert_eq!(issue.node_id.as_deref(), Some("A"));
    assert_eq!(issue.edge, Some(("B".to_string(), "A".to_string())));
    // The same edge also closes a cycle; both rules report independently.
    assert!(report.has_code(IssueCode::CycleDetected));
}

#[test]
fn actions_may_start_a_workflow_without_a_trigger() {
    let mut graph = Graph::new();
    graph.add_node(action("Fetch")).unwrap();
    graph.add_node(output("Done")).unwrap();
    graph.add_edge(Edge::new("Fetch", "Done")).unwrap();

    let report = validate(&graph);
    assert!(report.is_valid());
    assert!(!report.has_code(IssueCode::NoTrigger));
}

#[test]
fn transforms_alone_cannot_start_a_workflow() {
    let mut graph = Graph::new();
    graph.add_node(transform("Shape")).unwrap();
    graph.add_node(output("Done")).unwrap();
    graph.add_edge(Edge::new("Shape", "Done")).unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::NoTrigger));
}

#[test]
fn two_node_cycle_reports_both_members() {
    let mut graph = Graph::new();
    graph.add_node(action("A")).unwrap();
    graph.add_node(action("B")).unwrap();
    graph.add_edge(Edge::new("A", "B")).unwrap();
    graph.add_edge(Edge::new("B", "A")).unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());
    let cycle = report
        .issues
        .iter()
        .find(|i| i.code == IssueCode::CycleDetected)
        .expect("cycle issue present");
    assert!(cycle.cycle_nodes.contains(&"A".to_string()));
    assert!(cycle.cycle_nodes.contains(&"B".to_string()));
}

#[test]
fn self_loop_is_a_cycle() {
    let mut graph = Graph::new();
    graph.add_node(action("A")).unwrap();
    graph.add_edge(Edge::new("A", "A")).unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::CycleDetected));
}

#[test]
fn only_the_first_cycle_is_reported_per_pass() {
    let mut graph = Graph::new();
    for id in ["A", "B", "C", "D"] {
        graph.add_node(action(id)).unwrap();
    }
    graph.add_edge(Edge::new("A", "B")).unwrap();
    graph.add_edge(Edge::new("B", "A")).unwrap();
    graph.add_edge(Edge::new("C", "D")).unwrap();
    graph.add_edge(Edge::new("D", "C")).unwrap();

    let report = validate(&graph);
    let cycle_count = report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::CycleDetected)
        .count();
    assert_eq!(cycle_count, 1);
}

#[test]
fn cycles_in_unreachable_subgraphs_are_caught() {
    let mut graph = linear_workflow();
    graph.add_node(action("X")).unwrap();
    graph.add_node(action("Y")).unwrap();
    graph.add_edge(Edge::new("X", "Y")).unwrap();
    graph.add_edge(Edge::new("Y", "X")).unwrap();

    let report = validate(&graph);
    assert!(report.has_code(IssueCode::CycleDetected));
}

#[test]
fn lone_node_is_a_warning_not_an_error() {
    let mut graph = Graph::new();
    graph.add_node(action("D")).unwrap();

    let report = validate(&graph);
    assert!(report.is_valid());
    let orphans: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::OrphanNode)
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].node_id.as_deref(), Some("D"));
    assert_eq!(orphans[0].severity, Severity::Warning);
}

#[test]
fn unwired_terminals_are_warnings() {
    let mut graph = Graph::new();
    graph.add_node(trigger("Start")).unwrap();
    graph.add_node(action("Fetch")).unwrap();
    graph.add_node(output("Done")).unwrap();
    // Start feeds nothing; Done receives nothing; Fetch bridges neither.
    graph.add_edge(Edge::new("Start", "Fetch")).unwrap();

    let report = validate(&graph);
    assert!(report.is_valid());
    assert!(report.has_code(IssueCode::MissingInput));
    assert!(!report.has_code(IssueCode::NoOutput));

    graph.remove_edge(&Edge::new("Start", "Fetch"));
    let report = validate(&graph);
    assert!(report.has_code(IssueCode::NoOutput));
}

#[test]
fn action_url_rules() {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new(
            "NoUrl",
            "NoUrl",
            NodePayload::Action(ActionConfig::default()),
        ))
        .unwrap();
    graph
        .add_node(Node::new(
            "BadUrl",
            "BadUrl",
            NodePayload::Action(ActionConfig {
                url: "not a url".to_string(),
                ..ActionConfig::default()
            }),
        ))
        .unwrap();
    graph
        .add_node(Node::new(
            "Templated",
            "Templated",
            NodePayload::Action(ActionConfig {
                url: "{{Trigger1.body}}".to_string(),
                ..ActionConfig::default()
            }),
        ))
        .unwrap();

    let report = validate(&graph);
    let urls_flagged: Vec<_> = report
        .errors()
        .filter(|i| i.code == IssueCode::MissingInput)
        .filter_map(|i| i.node_id.as_deref())
        .collect();
    assert!(urls_flagged.contains(&"NoUrl"));
    assert!(urls_flagged.contains(&"BadUrl"));
    assert!(!urls_flagged.contains(&"Templated"));
}

#[test]
fn malformed_json_body_is_an_error() {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new(
            "Post",
            "Post",
            NodePayload::Action(ActionConfig {
                url: "https://api.example.com".to_string(),
                body_type: BodyType::Json,
                body: Some("{ not json".to_string()),
                ..ActionConfig::default()
            }),
        ))
        .unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());

    // A body with placeholders is exempt from the JSON parse until resolution.
    if let Some(node) = graph.node_mut("Post") {
        if let NodePayload::Action(config) = &mut node.payload {
            config.body = Some(r#"{ "fact": "{{Http1.fact}}" }"#.to_string());
        }
    }
    assert!(validate(&graph).is_valid());
}

#[test]
fn enabled_entry_without_key_is_an_error() {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new(
            "Fetch",
            "Fetch",
            NodePayload::Action(ActionConfig {
                url: "https://api.example.com".to_string(),
                headers: vec![KeyValueEntry {
                    key: "".to_string(),
                    value: "yes".to_string(),
                    enabled: true,
                }],
                ..ActionConfig::default()
            }),
        ))
        .unwrap();

    assert!(!validate(&graph).is_valid());

    // Disabling the entry silences the rule.
    if let Some(node) = graph.node_mut("Fetch") {
        if let NodePayload::Action(config) = &mut node.payload {
            config.headers[0].enabled = false;
        }
    }
    assert!(validate(&graph).is_valid());
}

#[test]
fn control_node_requires_rules() {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new(
            "Route",
            "Route",
            NodePayload::Control(ControlConfig::default()),
        ))
        .unwrap();

    let report = validate(&graph);
    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::MissingInput));
}

#[test]
fn fallback_to_unknown_node_is_invalid_connection() {
    let mut graph = linear_workflow();
    if let Some(node) = graph.node_mut("B") {
        node.error_strategy = ErrorStrategy::Fallback {
            node_id: "Ghost".to_string(),
        };
    }

    let report = validate(&graph);
    assert!(!report.is_valid());
    assert!(report.has_code(IssueCode::InvalidConnection));
}

#[test]
fn warnings_never_block_validity() {
    let graph = branching_workflow();
    let report = validate(&graph);
    assert!(report.is_valid());
    for warning in report.warnings() {
        assert_eq!(warning.severity, Severity::Warning);
    }
}
