use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::DeployError;

/// A non-fatal problem surfaced to the caller. Registry lookups report a
/// structured entry so the underlying error travels with the message.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Warning {
    Message(String),
    Lookup { msg: String, error: String },
}

#[derive(Serialize, Default, Debug)]
pub struct ReconcileBody {
    pub deployed: Vec<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

#[derive(Serialize, Debug)]
pub struct NotifyBody {
    pub status: String,
    pub area: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl NotifyBody {
    pub fn new(status: &str, area: &str) -> Self {
        NotifyBody {
            status: status.to_string(),
            area: area.to_string(),
            warnings: Vec::new(),
            msg: None,
            data: None,
        }
    }
}

pub fn happy_response<T: Serialize>(body: &T) -> Value {
    json!({
        "statusCode": 200,
        "headers": {
            "Content-Type": "application/json"
        },
        "body": body,
    })
}

/// Error envelope: status from the failing call when it reported a plausible
/// HTTP code, 500 otherwise.
pub fn sad_response(error: &anyhow::Error) -> Value {
    let code = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<DeployError>())
        .map(DeployError::status_code)
        .unwrap_or(500);
    json!({
        "statusCode": code,
        "headers": {
            "Content-Type": "text/plain",
            "x-amzn-ErrorType": code
        },
        "isBase64Encoded": false,
        "body": format!("{}: {}", code, error),
    })
}
