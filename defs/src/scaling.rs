use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Snapshot of a scaling group as the reconciler sees it; tags are flattened
/// into a plain map.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScalingGroup {
    pub name: String,
    pub desired_capacity: i32,
    pub tags: HashMap<String, String>,
}
