//! Common test utilities for building workflow graphs and documents.
use keiro::prelude::*;

/// A trigger node with manual firing.
#[allow(dead_code)]
pub fn trigger(id: &str) -> Node {
    Node::new(id, id, NodePayload::Trigger(TriggerConfig::default()))
}

/// An action node with a valid URL so the field rules stay quiet.
#[allow(dead_code)]
pub fn action(id: &str) -> Node {
    Node::new(
        id,
        id,
        NodePayload::Action(ActionConfig {
            url: "https://api.example.com/v1".to_string(),
            ..ActionConfig::default()
        }),
    )
}

/// An output node with defaults.
#[allow(dead_code)]
pub fn output(id: &str) -> Node {
    Node::new(id, id, NodePayload::Output(OutputConfig::default()))
}

/// A transform node with a trivial expression.
#[allow(dead_code)]
pub fn transform(id: &str) -> Node {
    Node::new(
        id,
        id,
        NodePayload::Transform(TransformConfig {
            expression: "input".to_string(),
        }),
    )
}

/// The canonical three-node workflow: A(trigger) -> B(action) -> C(output).
#[allow(dead_code)]
pub fn linear_workflow() -> Graph {
    let mut graph = Graph::new();
    graph.add_node(trigger("A")).unwrap();
    graph.add_node(action("B")).unwrap();
    graph.add_node(output("C")).unwrap();
    graph.add_edge(Edge::new("A", "B")).unwrap();
    graph.add_edge(Edge::new("B", "C")).unwrap();
    graph
}

/// A wider workflow with a control branch:
///
/// ```text
/// Start(trigger) -> Fetch(action) -> Route(control) -+-> Save(action) ----+-> Done(output)
///                                                    +-> Notify(action) -+
/// ```
#[allow(dead_code)]
pub fn branching_workflow() -> Graph {
    let mut graph = Graph::new();
    graph.add_node(trigger("Start")).unwrap();
    graph.add_node(action("Fetch")).unwrap();
    graph
        .add_node(Node::new(
            "Route",
            "Route",
            NodePayload::Control(ControlConfig {
                rules: vec![keiro::graph::ConditionRule {
                    field: "{{Fetch.status}}".to_string(),
                    operator: keiro::graph::ConditionOperator::Equals,
                    value: "200".to_string(),
                    output_handle: "ok".to_string(),
                }],
                default_handle: Some("else".to_string()),
            }),
        ))
        .unwrap();
    graph.add_node(action("Save")).unwrap();
    graph.add_node(action("Notify")).unwrap();
    graph.add_node(output("Done")).unwrap();

    graph.add_edge(Edge::new("Start", "Fetch")).unwrap();
    graph.add_edge(Edge::new("Fetch", "Route")).unwrap();
    graph
        .add_edge(Edge::new("Route", "Save").with_handles("ok", "in"))
        .unwrap();
    graph
        .add_edge(Edge::new("Route", "Notify").with_handles("else", "in"))
        .unwrap();
    graph.add_edge(Edge::new("Save", "Done")).unwrap();
    graph.add_edge(Edge::new("Notify", "Done")).unwrap();
    graph
}

/// An editor-shaped workflow document used by serialization tests.
#[allow(dead_code)]
pub const EDITOR_DOCUMENT_JSON: &str = r#"{
    "name": "Cat fact pipeline",
    "nodes": [
        {
            "id": "Trigger1",
            "label": "Run manually",
            "executionType": "trigger",
            "kind": "manual",
            "position": { "x": 80.0, "y": 80.0 }
        },
        {
            "id": "Http1",
            "label": "Fetch cat fact",
            "executionType": "action",
            "method": "GET",
            "url": "https://catfact.ninja/fact",
            "headers": [ { "key": "Accept", "value": "application/json", "enabled": true } ],
            "errorStrategy": {
                "strategy": "retry",
                "retryCount": 3,
                "retryDelayMs": 250,
                "retryBackoffMultiplier": 2.0
            }
        },
        {
            "id": "Shape1",
            "label": "Shape payload",
            "executionType": "transform",
            "expression": "{{Http1.fact}}"
        },
        {
            "id": "Out1",
            "label": "Workflow result",
            "executionType": "output",
            "format": "json"
        }
    ],
    "edges": [
        { "source": "Trigger1", "target": "Http1" },
        { "source": "Http1", "target": "Shape1", "sourceHandle": "fact", "targetHandle": "in" },
        { "source": "Shape1", "target": "Out1" }
    ]
}"#;
