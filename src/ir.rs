use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Extractor output: the typed component/flow graph of one repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub components: Vec<Component>,
    pub flows: Vec<Flow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    /// Raw kind string. Resolved to [`ComponentKind`] by the validator so an
    /// unknown value is reported against the component that carries it.
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(
        default,
        alias = "parent_id",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    #[serde(alias = "source_id")]
    pub source_id: String,
    #[serde(alias = "target_id")]
    pub target_id: String,
    #[serde(default, alias = "name")]
    pub label: String,
    #[serde(default, alias = "reverse_label", skip_serializing_if = "Option::is_none")]
    pub reverse_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortNumber>,
    #[serde(default)]
    pub bidirectional: bool,
}

/// Extractors emit ports both as numbers and as strings ("443", "8080-8090").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortNumber {
    Number(u64),
    Text(String),
}

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortNumber::Number(val) => write!(f, "{val}"),
            PortNumber::Text(val) => f.write_str(val),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Tenancy,
    Container,
    Network,
    Gateway,
    Compute,
    Storage,
    Actor,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Tenancy,
        ComponentKind::Container,
        ComponentKind::Network,
        ComponentKind::Gateway,
        ComponentKind::Compute,
        ComponentKind::Storage,
        ComponentKind::Actor,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "tenancy" => Some(Self::Tenancy),
            "container" => Some(Self::Container),
            "network" => Some(Self::Network),
            "gateway" => Some(Self::Gateway),
            "compute" => Some(Self::Compute),
            "storage" => Some(Self::Storage),
            "actor" => Some(Self::Actor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tenancy => "tenancy",
            Self::Container => "container",
            Self::Network => "network",
            Self::Gateway => "gateway",
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Actor => "actor",
        }
    }

    /// Container kinds become boundary cells and may hold children.
    pub fn is_container(self) -> bool {
        match self {
            Self::Tenancy | Self::Container | Self::Network => true,
            Self::Gateway | Self::Compute | Self::Storage | Self::Actor => false,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
