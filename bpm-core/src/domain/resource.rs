//! Resource kinds and their per-kind configuration

use serde::{Deserialize, Serialize};

/// A REST collection exposed by the BPM backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Install,
    Lead,
    Customer,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Install,
        ResourceKind::Lead,
        ResourceKind::Customer,
    ];

    /// Per-kind configuration used by the client and the list pipeline
    pub fn profile(self) -> &'static ResourceProfile {
        match self {
            ResourceKind::Install => &INSTALLS,
            ResourceKind::Lead => &LEADS,
            ResourceKind::Customer => &CUSTOMERS,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Install => write!(f, "install"),
            ResourceKind::Lead => write!(f, "lead"),
            ResourceKind::Customer => write!(f, "customer"),
        }
    }
}

/// Static description of how a resource kind is addressed and searched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceProfile {
    /// Collection path relative to the API base (e.g. "installs")
    pub path: &'static str,

    /// Fields inspected by the free-text query
    pub searchable_fields: &'static [&'static str],

    /// Field holding the status bucket that views narrow on
    pub status_field: &'static str,

    /// Whether every call needs a bearer token
    pub requires_auth: bool,
}

impl ResourceProfile {
    /// Path of the audit log sub-collection
    pub fn logs_path(&self) -> String {
        format!("{}/logs", self.path)
    }
}

pub static INSTALLS: ResourceProfile = ResourceProfile {
    path: "installs",
    searchable_fields: &["name", "email", "phone", "address"],
    status_field: "status",
    requires_auth: false,
};

pub static LEADS: ResourceProfile = ResourceProfile {
    path: "leads",
    searchable_fields: &["first_name", "last_name", "address"],
    status_field: "status_id",
    requires_auth: true,
};

pub static CUSTOMERS: ResourceProfile = ResourceProfile {
    path: "customers",
    searchable_fields: &["name", "email", "phone", "address"],
    status_field: "status",
    requires_auth: false,
};

/// Reference collections served alongside the resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceData {
    Users,
    LeadSources,
    LeadStatusOptions,
}

impl ReferenceData {
    pub fn path(self) -> &'static str {
        match self {
            ReferenceData::Users => "users",
            ReferenceData::LeadSources => "lead_sources",
            ReferenceData::LeadStatusOptions => "lead_status",
        }
    }
}
