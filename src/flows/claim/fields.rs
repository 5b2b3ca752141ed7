//! Field catalogue for the node-claim form.

use std::fmt;
use std::str::FromStr;

use crate::flows::FlowError;

/// Every field the claim form carries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClaimField {
    NodeName,
    NodeAlias,
    NodeDescription,
    NodeLocation,
    Pubkey,
    IpAddress,
    Port,
    TorAddress,
    SignatureMessage,
    Signature,
    AcceptTos,
    EnablePublicListing,
    EnableAutoUpdate,
}

/// Location choices offered on the first step: (id, label)
pub const NODE_LOCATIONS: &[(&str, &str)] = &[
    ("us-east", "United States (East)"),
    ("us-west", "United States (West)"),
    ("eu-west", "Europe (West)"),
    ("eu-central", "Europe (Central)"),
    ("asia-pacific", "Asia Pacific"),
    ("other", "Other"),
];

/// Default Lightning peer port
pub const DEFAULT_PORT: &str = "9735";

impl ClaimField {
    pub fn all() -> &'static [ClaimField] {
        &[
            ClaimField::NodeName,
            ClaimField::NodeAlias,
            ClaimField::NodeDescription,
            ClaimField::NodeLocation,
            ClaimField::Pubkey,
            ClaimField::IpAddress,
            ClaimField::Port,
            ClaimField::TorAddress,
            ClaimField::SignatureMessage,
            ClaimField::Signature,
            ClaimField::AcceptTos,
            ClaimField::EnablePublicListing,
            ClaimField::EnableAutoUpdate,
        ]
    }

    /// Stable key of the field in the form mapping
    pub fn key(&self) -> &'static str {
        match self {
            ClaimField::NodeName => "nodeName",
            ClaimField::NodeAlias => "nodeAlias",
            ClaimField::NodeDescription => "nodeDescription",
            ClaimField::NodeLocation => "nodeLocation",
            ClaimField::Pubkey => "pubkey",
            ClaimField::IpAddress => "ipAddress",
            ClaimField::Port => "port",
            ClaimField::TorAddress => "torAddress",
            ClaimField::SignatureMessage => "signatureMessage",
            ClaimField::Signature => "signature",
            ClaimField::AcceptTos => "acceptTOS",
            ClaimField::EnablePublicListing => "enablePublicListing",
            ClaimField::EnableAutoUpdate => "enableAutoUpdate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimField::NodeName => "Node Name",
            ClaimField::NodeAlias => "Node Alias",
            ClaimField::NodeDescription => "Description",
            ClaimField::NodeLocation => "Location",
            ClaimField::Pubkey => "Public Key",
            ClaimField::IpAddress => "IP Address",
            ClaimField::Port => "Port",
            ClaimField::TorAddress => "Tor Address (Optional)",
            ClaimField::SignatureMessage => "Message to Sign",
            ClaimField::Signature => "Signature",
            ClaimField::AcceptTos => "Accept Terms of Service",
            ClaimField::EnablePublicListing => "Enable public listing",
            ClaimField::EnableAutoUpdate => "Enable automatic updates",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            ClaimField::NodeName => "My Lightning Node",
            ClaimField::NodeAlias => "my-node",
            ClaimField::NodeDescription => "Describe your Lightning Network node...",
            ClaimField::Pubkey => "02a1b2c3d4e5f6789abcdef123456789...",
            ClaimField::IpAddress => "192.168.1.100",
            ClaimField::Port => DEFAULT_PORT,
            ClaimField::TorAddress => "abc123...xyz.onion",
            ClaimField::Signature => "Paste your signature here...",
            _ => "",
        }
    }

    /// The wizard step that collects this field
    pub fn step(&self) -> usize {
        match self {
            ClaimField::NodeName
            | ClaimField::NodeAlias
            | ClaimField::NodeDescription
            | ClaimField::NodeLocation => 1,
            ClaimField::Pubkey | ClaimField::IpAddress | ClaimField::Port | ClaimField::TorAddress => {
                2
            }
            ClaimField::SignatureMessage | ClaimField::Signature => 3,
            ClaimField::AcceptTos
            | ClaimField::EnablePublicListing
            | ClaimField::EnableAutoUpdate => 4,
        }
    }

    /// Boolean fields; everything else holds text
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            ClaimField::AcceptTos | ClaimField::EnablePublicListing | ClaimField::EnableAutoUpdate
        )
    }

    /// Fields the user can edit on a given step
    pub fn editable_on(step: usize) -> Vec<ClaimField> {
        ClaimField::all()
            .iter()
            .copied()
            .filter(|f| f.step() == step && *f != ClaimField::SignatureMessage)
            .collect()
    }

    pub fn default_value(&self) -> FieldValue {
        match self {
            ClaimField::Port => FieldValue::Text(DEFAULT_PORT.to_string()),
            ClaimField::AcceptTos => FieldValue::Flag(false),
            ClaimField::EnablePublicListing | ClaimField::EnableAutoUpdate => FieldValue::Flag(true),
            _ => FieldValue::Text(String::new()),
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ClaimField {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimField::all()
            .iter()
            .copied()
            .find(|f| f.key() == s)
            .ok_or_else(|| FlowError::UnknownField(s.to_string()))
    }
}

/// A form value: free text or a checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    /// Non-blank text, or a set checkbox
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Flag(flag) => *flag,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Human label for a location id, falling back to the raw value
pub fn location_label(id: &str) -> &str {
    NODE_LOCATIONS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
        .unwrap_or(id)
}
