//! Built-in marketplace data.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use super::{HolderShare, StatCard};
use crate::types::{
    Asset, AssetCategory, Btc, Channel, ChannelStatus, Holding, Node, NodePayment, NodeStatus,
    OrderRecord, OrderSide, OrderStatus, PaymentKind, Peer, PricePoint, Trade, Trend,
};

pub(super) fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: 1,
            name: "Bitcoin Ordinals".to_string(),
            symbol: "ORD".to_string(),
            price: Btc::scaled(1, 3),
            change_pct: Decimal::new(52, 1),
            volume: Btc::scaled(12_500, 0),
            market_cap: Btc::scaled(125_000, 0),
            category: AssetCategory::Collectibles,
            description: "Unique digital artifacts inscribed directly on Bitcoin using the Ordinals protocol.".to_string(),
            holders: 1234,
            is_favorite: false,
            is_new: true,
            total_supply: 21_000_000,
            circulating_supply: 125_000,
            website: "https://ordinals.com".to_string(),
            twitter: "@ordinals".to_string(),
            discord: "ordinals-discord".to_string(),
        },
        Asset {
            id: 2,
            name: "Lightning Stickers".to_string(),
            symbol: "STCK".to_string(),
            price: Btc::scaled(5, 4),
            change_pct: Decimal::new(-18, 1),
            volume: Btc::scaled(8_200, 0),
            market_cap: Btc::scaled(82_000, 0),
            category: AssetCategory::Utility,
            description: "Instant microtransaction tokens".to_string(),
            holders: 856,
            is_favorite: true,
            is_new: false,
            total_supply: 1_000_000,
            circulating_supply: 164_000,
            website: "https://lightningstickers.io".to_string(),
            twitter: "@lnstickers".to_string(),
            discord: "lnstickers".to_string(),
        },
        Asset {
            id: 3,
            name: "Taproot Tokens".to_string(),
            symbol: "TAP".to_string(),
            price: Btc::scaled(2, 3),
            change_pct: Decimal::new(121, 1),
            volume: Btc::scaled(18_900, 0),
            market_cap: Btc::scaled(189_000, 0),
            category: AssetCategory::Defi,
            description: "DeFi tokens on Taproot".to_string(),
            holders: 2341,
            is_favorite: false,
            is_new: true,
            total_supply: 100_000_000,
            circulating_supply: 94_500_000,
            website: "https://taproot.tokens".to_string(),
            twitter: "@taproottokens".to_string(),
            discord: "taproot-tokens".to_string(),
        },
        Asset {
            id: 4,
            name: "RGB Assets".to_string(),
            symbol: "RGB".to_string(),
            price: Btc::scaled(15, 4),
            change_pct: Decimal::new(87, 1),
            volume: Btc::scaled(15_200, 0),
            market_cap: Btc::scaled(152_000, 0),
            category: AssetCategory::Protocol,
            description: "Smart contract assets on RGB".to_string(),
            holders: 1876,
            is_favorite: false,
            is_new: false,
            total_supply: 500_000_000,
            circulating_supply: 101_333_333,
            website: "https://rgb.tech".to_string(),
            twitter: "@rgb_protocol".to_string(),
            discord: "rgb-protocol".to_string(),
        },
        Asset {
            id: 5,
            name: "Lightning NFTs".to_string(),
            symbol: "LNFT".to_string(),
            price: Btc::scaled(8, 4),
            change_pct: Decimal::new(34, 1),
            volume: Btc::scaled(9_800, 0),
            market_cap: Btc::scaled(98_000, 0),
            category: AssetCategory::Collectibles,
            description: "Fast NFT transfers on Lightning".to_string(),
            holders: 743,
            is_favorite: true,
            is_new: false,
            total_supply: 10_000_000,
            circulating_supply: 122_500,
            website: "https://lightning.nft".to_string(),
            twitter: "@lightningnfts".to_string(),
            discord: "lightning-nfts".to_string(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn node(
    id: u64,
    name: &str,
    alias: &str,
    pubkey: &str,
    status: NodeStatus,
    capacity: Btc,
    channels: u32,
    uptime_pct: Decimal,
    location: &str,
    fees: &str,
    last_update: &str,
    is_owned: bool,
) -> Node {
    Node {
        id,
        name: name.to_string(),
        alias: alias.to_string(),
        pubkey: pubkey.to_string(),
        status,
        capacity,
        channels,
        uptime_pct,
        location: location.to_string(),
        fees: fees.to_string(),
        last_update: last_update.to_string(),
        is_owned,
    }
}

pub(super) fn nodes() -> Vec<Node> {
    vec![
        node(
            1,
            "Lightning Node Alpha",
            "alpha-node",
            "02a1b2c3d4e5f6789abcdef123456789abcdef123456789abcdef123456789abcdef",
            NodeStatus::Online,
            Btc::scaled(525, 2),
            45,
            Decimal::new(998, 1),
            "New York, US",
            "0.001%",
            "2 minutes ago",
            false,
        ),
        node(
            2,
            "Lightning Node Beta",
            "beta-node",
            "03b2c3d4e5f6789abcdef123456789abcdef123456789abcdef123456789abcdef01",
            NodeStatus::Online,
            Btc::scaled(387, 2),
            32,
            Decimal::new(972, 1),
            "London, UK",
            "0.002%",
            "5 minutes ago",
            true,
        ),
        node(
            3,
            "Lightning Node Gamma",
            "gamma-node",
            "04c3d4e5f6789abcdef123456789abcdef123456789abcdef123456789abcdef0123",
            NodeStatus::Offline,
            Btc::scaled(214, 2),
            18,
            Decimal::new(891, 1),
            "Tokyo, JP",
            "0.003%",
            "1 hour ago",
            false,
        ),
        node(
            4,
            "Lightning Node Delta",
            "delta-node",
            "05d4e5f6789abcdef123456789abcdef123456789abcdef123456789abcdef012345",
            NodeStatus::Online,
            Btc::scaled(892, 2),
            67,
            Decimal::new(995, 1),
            "Berlin, DE",
            "0.001%",
            "30 seconds ago",
            false,
        ),
        node(
            5,
            "Lightning Node Echo",
            "echo-node",
            "06e5f6789abcdef123456789abcdef123456789abcdef123456789abcdef01234567",
            NodeStatus::Online,
            Btc::scaled(178, 2),
            23,
            Decimal::new(957, 1),
            "Sydney, AU",
            "0.004%",
            "12 minutes ago",
            true,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn holding(
    asset_id: u32,
    name: &str,
    symbol: &str,
    balance: i64,
    value: Btc,
    change_pct: Decimal,
    category: AssetCategory,
    last_transaction: &str,
) -> Holding {
    Holding {
        asset_id,
        name: name.to_string(),
        symbol: symbol.to_string(),
        balance: Decimal::from(balance),
        value,
        change_pct,
        category,
        last_transaction: last_transaction.to_string(),
    }
}

pub(super) fn holdings() -> Vec<Holding> {
    vec![
        holding(
            1,
            "Bitcoin Ordinals",
            "ORD",
            1250,
            Btc::scaled(125, 2),
            Decimal::new(52, 1),
            AssetCategory::Collectibles,
            "2 hours ago",
        ),
        holding(
            2,
            "Lightning Stickers",
            "STCK",
            850,
            Btc::scaled(425, 3),
            Decimal::new(-18, 1),
            AssetCategory::Utility,
            "1 day ago",
        ),
        holding(
            3,
            "Taproot Tokens",
            "TAP",
            2100,
            Btc::scaled(420, 2),
            Decimal::new(121, 1),
            AssetCategory::Defi,
            "3 hours ago",
        ),
        holding(
            4,
            "RGB Assets",
            "RGB",
            450,
            Btc::scaled(675, 3),
            Decimal::new(87, 1),
            AssetCategory::Protocol,
            "5 hours ago",
        ),
        holding(
            5,
            "Lightning NFTs",
            "LNFT",
            32,
            Btc::scaled(256, 4),
            Decimal::new(34, 1),
            AssetCategory::Collectibles,
            "1 hour ago",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_order(
    id: &str,
    side: OrderSide,
    asset: &str,
    symbol: &str,
    amount: i64,
    price: Btc,
    status: OrderStatus,
    (hour, minute): (u32, u32),
) -> OrderRecord {
    let amount = Decimal::from(amount);
    let total = price.checked_mul(amount).unwrap_or(Btc::ZERO);
    OrderRecord {
        id: id.to_string(),
        side,
        asset: asset.to_string(),
        symbol: symbol.to_string(),
        amount,
        price,
        total,
        fee: total.checked_mul(Decimal::new(1, 3)).unwrap_or(Btc::ZERO),
        status,
        date: Utc
            .with_ymd_and_hms(2024, 1, 19, hour, minute, 0)
            .single()
            .unwrap_or_default(),
        payment_method: None,
    }
}

pub(super) fn seed_orders() -> Vec<OrderRecord> {
    vec![
        seed_order(
            "ORD-001",
            OrderSide::Buy,
            "Bitcoin Ordinals",
            "ORD",
            100,
            Btc::scaled(1, 3),
            OrderStatus::Completed,
            (14, 30),
        ),
        seed_order(
            "ORD-002",
            OrderSide::Sell,
            "Lightning Stickers",
            "STCK",
            50,
            Btc::scaled(5, 4),
            OrderStatus::Pending,
            (13, 15),
        ),
        seed_order(
            "ORD-003",
            OrderSide::Buy,
            "Taproot Tokens",
            "TAP",
            75,
            Btc::scaled(2, 3),
            OrderStatus::Failed,
            (12, 45),
        ),
        seed_order(
            "ORD-004",
            OrderSide::Sell,
            "RGB Assets",
            "RGB",
            200,
            Btc::scaled(15, 4),
            OrderStatus::Cancelled,
            (11, 20),
        ),
        seed_order(
            "ORD-005",
            OrderSide::Buy,
            "Lightning NFTs",
            "LNFT",
            10,
            Btc::scaled(8, 4),
            OrderStatus::Completed,
            (10, 0),
        ),
    ]
}

pub(super) fn dashboard_stats() -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Assets",
            value: "1,234".to_string(),
            change: "+12%",
            trend: Trend::Up,
        },
        StatCard {
            title: "Active Nodes",
            value: "56".to_string(),
            change: "+3",
            trend: Trend::Up,
        },
        StatCard {
            title: "Market Cap",
            value: Btc::scaled(245, 2).to_string(),
            change: "-2.1%",
            trend: Trend::Down,
        },
        StatCard {
            title: "Volume (24h)",
            value: Btc::scaled(89, 2).to_string(),
            change: "+18.5%",
            trend: Trend::Up,
        },
    ]
}

pub(super) fn price_history() -> Vec<PricePoint> {
    [
        ("2024-01-15", 8, 8_200),
        ("2024-01-16", 9, 9_100),
        ("2024-01-17", 10, 12_500),
        ("2024-01-18", 11, 15_300),
        ("2024-01-19", 10, 11_800),
    ]
    .into_iter()
    .map(|(date, price, volume)| PricePoint {
        date: date.to_string(),
        price: Btc::scaled(price, 4),
        volume: Btc::scaled(volume, 0),
    })
    .collect()
}

pub(super) fn recent_trades() -> Vec<Trade> {
    [
        (OrderSide::Buy, 100, 10, "alice...bitcoin", "2 minutes ago"),
        (OrderSide::Sell, 50, 9, "bob...lightning", "5 minutes ago"),
        (OrderSide::Buy, 200, 10, "charlie...node", "8 minutes ago"),
        (OrderSide::Sell, 75, 8, "dave...wallet", "12 minutes ago"),
    ]
    .into_iter()
    .map(|(side, quantity, price, counterparty, time)| Trade {
        side,
        quantity: Decimal::from(quantity),
        price: Btc::scaled(price, 4),
        counterparty: counterparty.to_string(),
        time: time.to_string(),
    })
    .collect()
}

pub(super) fn top_holders() -> Vec<HolderShare> {
    [
        ("bc1q...abc123", 1500, 125),
        ("bc1q...def456", 1200, 100),
        ("bc1q...ghi789", 900, 75),
        ("bc1q...jkl012", 800, 67),
    ]
    .into_iter()
    .map(|(address, balance, share)| HolderShare {
        address: address.to_string(),
        balance: Decimal::from(balance),
        share_pct: Decimal::new(share, 1),
    })
    .collect()
}

pub(super) fn channels() -> Vec<Channel> {
    [
        ("bob...lightning", 125, 75, 50, ChannelStatus::Active),
        ("alice...bitcoin", 85, 35, 50, ChannelStatus::Active),
        ("charlie...node", 215, 115, 100, ChannelStatus::Pending),
        ("dave...wallet", 95, 45, 50, ChannelStatus::Active),
    ]
    .into_iter()
    .map(|(peer, capacity, local, remote, status)| Channel {
        peer: peer.to_string(),
        capacity: Btc::scaled(capacity, 2),
        local: Btc::scaled(local, 2),
        remote: Btc::scaled(remote, 2),
        status,
    })
    .collect()
}

pub(super) fn peers() -> Vec<Peer> {
    [
        ("bob-lightning", "03b1c2d3...", 3, 21, true),
        ("alice-bitcoin", "04c2d3e4...", 2, 15, true),
        ("charlie-node", "05d3e4f5...", 1, 8, false),
        ("dave-wallet", "06e4f5a6...", 4, 32, true),
    ]
    .into_iter()
    .map(|(alias, pubkey, channels, capacity, connected)| Peer {
        alias: alias.to_string(),
        pubkey: pubkey.to_string(),
        channels,
        capacity: Btc::scaled(capacity, 1),
        connected,
    })
    .collect()
}

pub(super) fn node_payments() -> Vec<NodePayment> {
    [
        (PaymentKind::Payment, 5, 1, true, "2 minutes ago"),
        (PaymentKind::Invoice, 12, 2, true, "8 minutes ago"),
        (PaymentKind::Payment, 3, 1, false, "15 minutes ago"),
        (PaymentKind::Invoice, 25, 3, true, "23 minutes ago"),
    ]
    .into_iter()
    .map(|(kind, amount, fee, succeeded, time)| NodePayment {
        kind,
        amount: Btc::scaled(amount, 3),
        fee: Btc::scaled(fee, 5),
        succeeded,
        time: time.to_string(),
    })
    .collect()
}
