use serde::{Deserialize, Serialize};
use std::fmt;

/// The execution role of a node. Every node belongs to exactly one role, and
/// the role decides which payload variant it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionType {
    Trigger,
    Action,
    Transform,
    Control,
    Output,
}

impl fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionType::Trigger => "trigger",
            ExecutionType::Action => "action",
            ExecutionType::Transform => "transform",
            ExecutionType::Control => "control",
            ExecutionType::Output => "output",
        };
        write!(f, "{}", name)
    }
}

/// A single node in the workflow graph.
///
/// Identity is the `id`, unique within a graph and immutable once inserted.
/// The payload is owned exclusively by the node and its variant always
/// matches the node's execution type.
#[derive(Debug, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub payload: NodePayload,
    #[serde(default, alias = "errorStrategy")]
    pub error_strategy: ErrorStrategy,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            payload,
            error_strategy: ErrorStrategy::default(),
        }
    }

    pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
        self.error_strategy = strategy;
        self
    }

    pub fn execution_type(&self) -> ExecutionType {
        self.payload.execution_type()
    }
}

/// Per-type node configuration, keyed by the node's execution type.
///
/// Modeled as a sum type so the validator and the semantics resolver dispatch
/// via exhaustive matches; adding a node type is a compile error until every
/// consumer handles it.
#[derive(Debug, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(tag = "executionType", rename_all = "lowercase")]
pub enum NodePayload {
    Trigger(TriggerConfig),
    Action(ActionConfig),
    Transform(TransformConfig),
    Control(ControlConfig),
    Output(OutputConfig),
}

impl NodePayload {
    pub fn execution_type(&self) -> ExecutionType {
        match self {
            NodePayload::Trigger(_) => ExecutionType::Trigger,
            NodePayload::Action(_) => ExecutionType::Action,
            NodePayload::Transform(_) => ExecutionType::Transform,
            NodePayload::Control(_) => ExecutionType::Control,
            NodePayload::Output(_) => ExecutionType::Output,
        }
    }
}

/// How a trigger node is fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    #[default]
    Manual,
    Webhook,
    Schedule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct TriggerConfig {
    #[serde(default)]
    pub kind: TriggerKind,
    /// Cron expression, required when `kind` is `Schedule`.
    #[serde(default)]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub enum HttpMethod {
    #[default]
    #[serde(alias = "get")]
    GET,
    #[serde(alias = "post")]
    POST,
    #[serde(alias = "put")]
    PUT,
    #[serde(alias = "patch")]
    PATCH,
    #[serde(alias = "delete")]
    DELETE,
}

/// Body encoding of an action request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[default]
    None,
    Json,
    Form,
    Raw,
}

/// A header or query entry. Disabled entries are kept in the payload so the
/// editor round-trips them, but they are excluded from validation and
/// execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct KeyValueEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// Authentication applied to an action request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    #[serde(rename = "apikey", alias = "apiKey")]
    ApiKey {
        header: String,
        key: String,
    },
}

/// Maps a field of the action's response onto a named output port.
#[derive(Debug, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct FieldMapping {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct ActionConfig {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: Vec<KeyValueEntry>,
    #[serde(default)]
    pub query: Vec<KeyValueEntry>,
    #[serde(default, alias = "bodyType")]
    pub body_type: BodyType,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default, alias = "fieldMappings")]
    pub field_mappings: Vec<FieldMapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct TransformConfig {
    /// The transform expression, evaluated synchronously by the executor.
    #[serde(default)]
    pub expression: String,
}

/// Comparison applied by a control-node rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

/// One ordered rule of a control node. The first rule whose condition holds
/// routes execution through its named output handle.
#[derive(Debug, Clone, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct ConditionRule {
    pub field: String,
    #[serde(default)]
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: String,
    #[serde(alias = "outputHandle")]
    pub output_handle: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct ControlConfig {
    #[serde(default)]
    pub rules: Vec<ConditionRule>,
    /// Handle taken when no rule matches.
    #[serde(default, alias = "defaultHandle")]
    pub default_handle: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub destination: Option<String>,
}

/// The policy applied when a node fails during execution.
///
/// The engine only decides the resulting state transition; performing the
/// retry wait or the fallback substitution is the executor's job.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ErrorStrategy {
    /// Abort the whole plan.
    #[default]
    Stop,
    /// Mark the node's entire downstream set as skipped and continue.
    SkipBranch,
    /// Re-invoke with exponential backoff, degrading to `Stop` on exhaustion.
    Retry {
        #[serde(alias = "retryCount")]
        count: u32,
        #[serde(alias = "retryDelayMs")]
        delay_ms: u64,
        #[serde(default = "backoff_default", alias = "retryBackoffMultiplier")]
        backoff_multiplier: f64,
    },
    /// Substitute the named node's result in place of this node's output.
    Fallback {
        #[serde(alias = "fallbackNodeId")]
        node_id: String,
    },
}

fn backoff_default() -> f64 {
    2.0
}
