// Organisation unit tree node, in the renamed shape the field filter produces
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnitNode {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub leaf: bool,
}
