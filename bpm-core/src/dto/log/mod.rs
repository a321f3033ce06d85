//! Log DTOs

use serde::{Deserialize, Serialize};

/// Body of an audit log append
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendLog {
    pub content: String,
    pub action: String,
}
