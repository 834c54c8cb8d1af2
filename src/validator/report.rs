use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation issue. Only `Error` issues block execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Machine-readable codes for every structural rule the validator checks.
///
/// These serialize in the SCREAMING_SNAKE_CASE form the editor keys its
/// lint presentation on (`NO_TRIGGER`, `CYCLE_DETECTED`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// No trigger node and no node type that may start a workflow.
    NoTrigger,
    /// More than one trigger node.
    MultipleTriggers,
    /// A trigger node with an incoming edge; triggers must have in-degree 0.
    TriggerHasInput,
    /// A back-edge was found. Only the first discovered cycle is reported
    /// per validation pass; re-validating after a fix surfaces the next one.
    CycleDetected,
    /// A node with neither incoming nor outgoing edges (warning).
    OrphanNode,
    /// A required per-node field is missing or malformed, or an output node
    /// has no incoming edge (warning in the latter case).
    MissingInput,
    /// A connection-shaped field references something that does not exist,
    /// e.g. a fallback strategy naming an unknown node.
    InvalidConnection,
    /// A trigger node with no outgoing edge (warning).
    NoOutput,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            IssueCode::NoTrigger => "NO_TRIGGER",
            IssueCode::MultipleTriggers => "MULTIPLE_TRIGGERS",
            IssueCode::TriggerHasInput => "TRIGGER_HAS_INPUT",
            IssueCode::CycleDetected => "CYCLE_DETECTED",
            IssueCode::OrphanNode => "ORPHAN_NODE",
            IssueCode::MissingInput => "MISSING_INPUT",
            IssueCode::InvalidConnection => "INVALID_CONNECTION",
            IssueCode::NoOutput => "NO_OUTPUT",
        };
        write!(f, "{}", code)
    }
}

/// A single validation finding: a code, a human-readable message, and the
/// node or edge it is scoped to (when one applies).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    #[serde(default, alias = "nodeId")]
    pub node_id: Option<String>,
    /// `(source, target)` endpoints of the offending edge, if any.
    #[serde(default)]
    pub edge: Option<(String, String)>,
    /// Node ids on the discovered cycle path, for `CYCLE_DETECTED`.
    #[serde(default, alias = "cycleNodes")]
    pub cycle_nodes: Vec<String>,
}

impl Issue {
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            node_id: None,
            edge: None,
            cycle_nodes: Vec::new(),
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    pub fn on_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn on_edge(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.edge = Some((source.into(), target.into()));
        self
    }

    pub fn with_cycle(mut self, nodes: Vec<String>) -> Self {
        self.cycle_nodes = nodes;
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} ({}): {}", tag, self.code, id, self.message),
            None => write!(f, "[{}] {}: {}", tag, self.code, self.message),
        }
    }
}

/// The exhaustive result of one validation pass.
///
/// Rules never short-circuit: every violation in the graph appears here so
/// the editor can surface all of them at once. Warnings never affect
/// [`ValidationReport::is_valid`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// True iff the report contains no `Error`-severity issues. A valid
    /// graph is structurally executable; warnings are advisory only.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}
