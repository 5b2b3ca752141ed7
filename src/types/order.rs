//! Marketplace orders.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::btc::Btc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl OrderStatus {
    pub fn all() -> &'static [OrderStatus] {
        &[
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Failed,
            OrderStatus::Cancelled,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Failed => "Failed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::all()
            .iter()
            .copied()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn label(&self) -> &'static str {
        match self {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Lightning,
    Onchain,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Lightning, PaymentMethod::Onchain]
    }

    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::Lightning => "lightning",
            PaymentMethod::Onchain => "onchain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Lightning => "Lightning Network",
            PaymentMethod::Onchain => "On-chain Bitcoin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::Lightning => "Instant, low-fee payments",
            PaymentMethod::Onchain => "Secure, slower confirmation",
        }
    }

    /// What the buyer receives once the order is submitted
    pub fn instructions(&self) -> &'static str {
        match self {
            PaymentMethod::Lightning => "You will receive a Lightning invoice to complete payment.",
            PaymentMethod::Onchain => "You will receive a Bitcoin address for on-chain payment.",
        }
    }
}

/// A submitted order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub side: OrderSide,
    pub asset: String,
    pub symbol: String,
    pub amount: Decimal,
    pub price: Btc,
    /// `amount × price`, fee excluded
    pub total: Btc,
    pub fee: Btc,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl OrderRecord {
    /// Amount the buyer actually pays
    pub fn grand_total(&self) -> Btc {
        self.total + self.fee
    }

    pub fn date_display(&self) -> String {
        self.date.format("%Y-%m-%d %H:%M").to_string()
    }

    /// `100 ORD`
    pub fn quantity_display(&self) -> String {
        format!("{} {}", self.amount.normalize(), self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "completed".parse::<OrderStatus>().unwrap(),
            OrderStatus::Completed
        );
        assert_eq!(
            " PENDING ".parse::<OrderStatus>().unwrap(),
            OrderStatus::Pending
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_grand_total_adds_fee() {
        let order = OrderRecord {
            id: "ORD-001".to_string(),
            side: OrderSide::Buy,
            asset: "Bitcoin Ordinals".to_string(),
            symbol: "ORD".to_string(),
            amount: Decimal::from(100),
            price: Btc::scaled(1, 3),
            total: Btc::scaled(1, 1),
            fee: Btc::scaled(1, 4),
            status: OrderStatus::Completed,
            date: DateTime::<Utc>::default(),
            payment_method: None,
        };
        assert_eq!(order.grand_total(), Btc::scaled(1001, 4));
        assert_eq!(order.quantity_display(), "100 ORD");
    }
}
