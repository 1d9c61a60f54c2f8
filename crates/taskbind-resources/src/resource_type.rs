//! Resource type registry
//!
//! The set of resource kinds is closed. Every kind may be bound as a task
//! input; only `storage` and `git` may be bound as outputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of endpoint a pipeline resource represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// A git repository
    #[serde(rename = "git")]
    Git,
    /// A storage blob
    #[serde(rename = "storage")]
    Storage,
    /// A container image
    #[serde(rename = "image")]
    Image,
    /// A cluster to deploy to
    #[serde(rename = "cluster")]
    Cluster,
    /// An SCM pull request
    #[serde(rename = "pullRequest")]
    PullRequest,
    /// A cloud event sink URI
    #[serde(rename = "cloudEvent")]
    CloudEvent,
}

/// Every known resource type, in declaration order
pub const ALL_RESOURCE_TYPES: [ResourceType; 6] = [
    ResourceType::Git,
    ResourceType::Storage,
    ResourceType::Image,
    ResourceType::Cluster,
    ResourceType::PullRequest,
    ResourceType::CloudEvent,
];

impl ResourceType {
    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Storage => "storage",
            Self::Image => "image",
            Self::Cluster => "cluster",
            Self::PullRequest => "pullRequest",
            Self::CloudEvent => "cloudEvent",
        }
    }

    /// Whether a resource of this type may be bound as a task output
    pub fn is_output_allowed(&self) -> bool {
        matches!(self, Self::Storage | Self::Git)
    }

    /// Types that may be bound as task outputs
    pub fn output_types() -> impl Iterator<Item = ResourceType> {
        ALL_RESOURCE_TYPES
            .into_iter()
            .filter(ResourceType::is_output_allowed)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that names no known resource type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type '{0}'")]
pub struct UnknownResourceType(pub String);

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_RESOURCE_TYPES
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownResourceType(s.to_string()))
    }
}

/// Check whether `t` names one of the known resource types
pub fn is_valid_type(t: &str) -> bool {
    t.parse::<ResourceType>().is_ok()
}

/// Check whether `t` names a resource type that is legal as a task output
pub fn is_valid_output_type(t: &str) -> bool {
    t.parse::<ResourceType>()
        .is_ok_and(|rt| rt.is_output_allowed())
}
