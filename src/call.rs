use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Scheduler call discriminant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallType {
    Subscribe,
    Teardown,
    Accept,
    Decline,
    AcceptInverseOffers,
    DeclineInverseOffers,
    Revive,
    Kill,
    Shutdown,
    Acknowledge,
    AcknowledgeOperationStatus,
    Reconcile,
    ReconcileOperations,
    Message,
    Request,
    Suppress,
    UpdateFramework,
}

/// A scheduler API call.
///
/// The body is carried as opaque JSON; only the type discriminant is
/// interpreted by the dispatcher.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Call {
    #[serde(rename = "type")]
    kind: CallType,
    #[serde(skip_serializing_if = "Option::is_none")]
    framework_id: Option<FrameworkId>,
    #[serde(flatten)]
    body: Map<String, JsonValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FrameworkId {
    value: String,
}

impl Call {
    /// Creates a call with an empty body.
    pub fn new(kind: CallType) -> Self {
        Self {
            kind,
            framework_id: None,
            body: Map::new(),
        }
    }

    /// Builds a SUBSCRIBE call for the given `FrameworkInfo` JSON.
    pub fn subscribe(framework_info: JsonValue) -> Self {
        Self::new(CallType::Subscribe)
            .with_field("subscribe", serde_json::json!({ "framework_info": framework_info }))
    }

    pub fn with_framework_id(mut self, id: impl Into<String>) -> Self {
        self.framework_id = Some(FrameworkId { value: id.into() });
        self
    }

    /// Sets a top-level body field such as `"accept"` or `"kill"`.
    pub fn with_field(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.body.insert(name.into(), value);
        self
    }

    pub fn kind(&self) -> CallType {
        self.kind
    }

    pub fn is_subscribe(&self) -> bool {
        self.kind == CallType::Subscribe
    }
}
