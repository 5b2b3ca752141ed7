//! Marketplace catalog: assets, nodes and the user's portfolio.

mod data;
pub mod query;

use rust_decimal::Decimal;

pub use query::{AssetQuery, AssetSort, CategoryFilter, HoldingQuery, NodeQuery};

use crate::types::{
    Asset, Btc, Channel, Holding, Node, NodePayment, OrderRecord, Peer, PricePoint, Trade, Trend,
};

/// Headline figure on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: &'static str,
    pub trend: Trend,
}

/// Share of an asset's supply held by one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderShare {
    pub address: String,
    pub balance: Decimal,
    pub share_pct: Decimal,
}

/// All browseable data, loaded once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    assets: Vec<Asset>,
    nodes: Vec<Node>,
    holdings: Vec<Holding>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            assets: data::assets(),
            nodes: data::nodes(),
            holdings: data::holdings(),
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn asset(&self, id: u32) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn asset_by_symbol(&self, symbol: &str) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Add a freshly claimed node to the explorer
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn owned_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_owned)
    }

    /// Sum of all holding values
    pub fn portfolio_value(&self) -> Btc {
        self.holdings.iter().map(|h| h.value).sum()
    }

    pub fn dashboard_stats(&self) -> Vec<StatCard> {
        data::dashboard_stats()
    }

    /// The newest listings shown on the dashboard
    pub fn recent_assets(&self, limit: usize) -> Vec<&Asset> {
        self.assets.iter().take(limit).collect()
    }

    /// Nodes shown under "Active Nodes" on the dashboard
    pub fn active_nodes(&self, limit: usize) -> Vec<&Node> {
        self.nodes.iter().take(limit).collect()
    }

    pub fn price_history(&self, _asset: &Asset) -> Vec<PricePoint> {
        data::price_history()
    }

    pub fn recent_trades(&self, _asset: &Asset) -> Vec<Trade> {
        data::recent_trades()
    }

    pub fn top_holders(&self, _asset: &Asset) -> Vec<HolderShare> {
        data::top_holders()
    }

    pub fn channels(&self, _node: &Node) -> Vec<Channel> {
        data::channels()
    }

    pub fn peers(&self, _node: &Node) -> Vec<Peer> {
        data::peers()
    }

    pub fn payments(&self, _node: &Node) -> Vec<NodePayment> {
        data::node_payments()
    }
}

/// Orders present before the user places any
pub fn seed_orders() -> Vec<OrderRecord> {
    data::seed_orders()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_sizes() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.assets().len(), 5);
        assert_eq!(catalog.nodes().len(), 5);
        assert_eq!(catalog.holdings().len(), 5);
        assert_eq!(seed_orders().len(), 5);
    }

    #[test]
    fn test_portfolio_value_sums_holdings() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.portfolio_value(), Btc::scaled(65756, 4));
    }

    #[test]
    fn test_asset_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.asset(3).map(|a| a.symbol.as_str()), Some("TAP"));
        assert_eq!(
            catalog.asset_by_symbol("rgb").map(|a| a.id),
            Some(4)
        );
        assert!(catalog.asset(99).is_none());
    }

    #[test]
    fn test_claimed_node_is_listed_as_owned() {
        let mut catalog = Catalog::builtin();
        let before = catalog.owned_nodes().count();
        let mut node = catalog.nodes()[0].clone();
        node.id = 42;
        node.is_owned = true;
        catalog.add_node(node);
        assert_eq!(catalog.owned_nodes().count(), before + 1);
    }

    #[test]
    fn test_seed_orders_carry_fee() {
        let first = &seed_orders()[0];
        assert_eq!(first.total.to_string(), "₿0.1");
        assert_eq!(first.fee.to_string(), "₿0.0001");
    }
}
