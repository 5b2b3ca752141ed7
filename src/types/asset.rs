//! Taproot assets listed on the marketplace and the user's holdings of them.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::btc::{format_change, Btc};
use super::order::OrderSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Collectibles,
    Utility,
    Defi,
    Protocol,
}

impl AssetCategory {
    pub fn all() -> &'static [AssetCategory] {
        &[
            AssetCategory::Collectibles,
            AssetCategory::Utility,
            AssetCategory::Defi,
            AssetCategory::Protocol,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            AssetCategory::Collectibles => "collectibles",
            AssetCategory::Utility => "utility",
            AssetCategory::Defi => "defi",
            AssetCategory::Protocol => "protocol",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetCategory::Collectibles => "Collectibles",
            AssetCategory::Utility => "Utility",
            AssetCategory::Defi => "DeFi",
            AssetCategory::Protocol => "Protocol",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetCategory::all()
            .iter()
            .copied()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown asset category '{s}'"))
    }
}

/// Price direction over the last 24h
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u32,
    pub name: String,
    pub symbol: String,
    pub price: Btc,
    /// 24h change in percent
    pub change_pct: Decimal,
    pub volume: Btc,
    pub market_cap: Btc,
    pub category: AssetCategory,
    pub description: String,
    pub holders: u32,
    pub is_favorite: bool,
    pub is_new: bool,
    pub total_supply: u64,
    pub circulating_supply: u64,
    pub website: String,
    pub twitter: String,
    pub discord: String,
}

impl Asset {
    pub fn trend(&self) -> Trend {
        if self.change_pct.is_sign_negative() {
            Trend::Down
        } else {
            Trend::Up
        }
    }

    pub fn change_display(&self) -> String {
        format_change(self.change_pct)
    }
}

/// One day of the asset's price history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: Btc,
    pub volume: Btc,
}

/// A recent public trade in an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: OrderSide,
    pub quantity: Decimal,
    pub price: Btc,
    pub counterparty: String,
    pub time: String,
}

/// An asset balance held in the user's portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub asset_id: u32,
    pub name: String,
    pub symbol: String,
    pub balance: Decimal,
    pub value: Btc,
    pub change_pct: Decimal,
    pub category: AssetCategory,
    pub last_transaction: String,
}

impl Holding {
    pub fn trend(&self) -> Trend {
        if self.change_pct.is_sign_negative() {
            Trend::Down
        } else {
            Trend::Up
        }
    }

    pub fn change_display(&self) -> String {
        format_change(self.change_pct)
    }

    /// Unit value of the holding, used to seed a sell order
    pub fn unit_price(&self) -> Btc {
        if self.balance.is_zero() {
            Btc::ZERO
        } else {
            Btc::new(self.value.value() / self.balance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_id() {
        for category in AssetCategory::all() {
            assert_eq!(category.id().parse::<AssetCategory>().unwrap(), *category);
        }
        assert!("memes".parse::<AssetCategory>().is_err());
    }

    #[test]
    fn test_holding_unit_price() {
        let holding = Holding {
            asset_id: 1,
            name: "Bitcoin Ordinals".to_string(),
            symbol: "ORD".to_string(),
            balance: Decimal::from(1250),
            value: Btc::scaled(125, 2),
            change_pct: Decimal::new(52, 1),
            category: AssetCategory::Collectibles,
            last_transaction: "2 hours ago".to_string(),
        };
        assert_eq!(holding.unit_price(), Btc::scaled(1, 3));
    }
}
