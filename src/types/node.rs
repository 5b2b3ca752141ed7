//! Lightning Network nodes and the data shown on a node profile.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::btc::Btc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    Online,
    Offline,
}

impl NodeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NodeStatus::Online => "Online",
            NodeStatus::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub name: String,
    pub alias: String,
    pub pubkey: String,
    pub status: NodeStatus,
    pub capacity: Btc,
    pub channels: u32,
    /// Uptime in percent
    pub uptime_pct: Decimal,
    pub location: String,
    pub fees: String,
    pub last_update: String,
    pub is_owned: bool,
}

impl Node {
    pub fn uptime_display(&self) -> String {
        format!("{}%", self.uptime_pct.normalize())
    }

    /// Pubkey shortened for list rows
    pub fn short_pubkey(&self) -> String {
        let chars: Vec<char> = self.pubkey.chars().collect();
        if chars.len() <= 16 {
            self.pubkey.clone()
        } else {
            let head: String = chars[..8].iter().collect();
            let tail: String = chars[chars.len() - 6..].iter().collect();
            format!("{head}...{tail}")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelStatus {
    Active,
    Pending,
}

impl ChannelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelStatus::Active => "Active",
            ChannelStatus::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub peer: String,
    pub capacity: Btc,
    pub local: Btc,
    pub remote: Btc,
    pub status: ChannelStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub alias: String,
    pub pubkey: String,
    pub channels: u32,
    pub capacity: Btc,
    pub connected: bool,
}

impl Peer {
    pub fn status_label(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Disconnected"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    Payment,
    Invoice,
}

impl PaymentKind {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentKind::Payment => "Payment",
            PaymentKind::Invoice => "Invoice",
        }
    }
}

/// A payment routed through the node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePayment {
    pub kind: PaymentKind,
    pub amount: Btc,
    pub fee: Btc,
    pub succeeded: bool,
    pub time: String,
}

impl NodePayment {
    pub fn status_label(&self) -> &'static str {
        if self.succeeded {
            "Success"
        } else {
            "Failed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with_pubkey(pubkey: &str) -> Node {
        Node {
            id: 1,
            name: "n".to_string(),
            alias: "n".to_string(),
            pubkey: pubkey.to_string(),
            status: NodeStatus::Online,
            capacity: Btc::ZERO,
            channels: 0,
            uptime_pct: Decimal::from(100),
            location: String::new(),
            fees: String::new(),
            last_update: String::new(),
            is_owned: false,
        }
    }

    #[test]
    fn test_short_pubkey_truncates_long_keys() {
        let node = node_with_pubkey("02a1b2c3d4e5f6789abcdef123456789abcdef");
        assert_eq!(node.short_pubkey(), "02a1b2c3...abcdef");
    }

    #[test]
    fn test_short_pubkey_keeps_short_keys() {
        assert_eq!(node_with_pubkey("02aa").short_pubkey(), "02aa");
    }

    #[test]
    fn test_uptime_display() {
        let mut node = node_with_pubkey("02aa");
        node.uptime_pct = Decimal::new(998, 1);
        assert_eq!(node.uptime_display(), "99.8%");
    }
}
