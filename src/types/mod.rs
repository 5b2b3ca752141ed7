//! Domain types shared by the flows, the catalog and the TUI.

mod asset;
mod btc;
mod node;
mod order;

pub use asset::{Asset, AssetCategory, Holding, PricePoint, Trade, Trend};
pub use btc::{
    format_change, parse_positive_quantity, parse_quantity, AmountError, Btc, BTC_SIGN,
};
pub use node::{Channel, ChannelStatus, Node, NodePayment, NodeStatus, PaymentKind, Peer};
pub use order::{OrderRecord, OrderSide, OrderStatus, PaymentMethod};

/// Coarse classification of a status word, used to pick badge colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Positive,
    Waiting,
    Negative,
    Neutral,
}

/// Classify any status label shown in the app (orders, nodes, peers, payments)
pub fn status_tone(status: &str) -> StatusTone {
    match status.to_ascii_lowercase().as_str() {
        "completed" | "success" | "active" | "online" | "connected" => StatusTone::Positive,
        "pending" | "processing" => StatusTone::Waiting,
        "failed" | "cancelled" | "offline" | "disconnected" => StatusTone::Negative,
        _ => StatusTone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tone_groups() {
        assert_eq!(status_tone("Completed"), StatusTone::Positive);
        assert_eq!(status_tone("online"), StatusTone::Positive);
        assert_eq!(status_tone("Processing"), StatusTone::Waiting);
        assert_eq!(status_tone("Cancelled"), StatusTone::Negative);
        assert_eq!(status_tone("Disconnected"), StatusTone::Negative);
        assert_eq!(status_tone("Unknown"), StatusTone::Neutral);
    }
}
