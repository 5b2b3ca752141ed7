//! The session's order list: seeded history plus orders placed at checkout.

use std::str::FromStr;

use crate::catalog::seed_orders;
use crate::types::{Btc, OrderRecord, OrderSide, OrderStatus};

/// `all` or one order status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }

    pub fn next(self) -> Self {
        let statuses = OrderStatus::all();
        match self {
            StatusFilter::All => StatusFilter::Only(statuses[0]),
            StatusFilter::Only(s) => statuses
                .iter()
                .position(|x| *x == s)
                .and_then(|i| statuses.get(i + 1))
                .map_or(StatusFilter::All, |s| StatusFilter::Only(*s)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(s) => s.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Tabs above the order table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SideTab {
    #[default]
    All,
    Buy,
    Sell,
}

impl SideTab {
    pub fn all() -> &'static [SideTab] {
        &[SideTab::All, SideTab::Buy, SideTab::Sell]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SideTab::All => "All Orders",
            SideTab::Buy => "Buy Orders",
            SideTab::Sell => "Sell Orders",
        }
    }

    pub fn matches(&self, side: OrderSide) -> bool {
        match self {
            SideTab::All => true,
            SideTab::Buy => side == OrderSide::Buy,
            SideTab::Sell => side == OrderSide::Sell,
        }
    }

    pub fn next(self) -> Self {
        match self {
            SideTab::All => SideTab::Buy,
            SideTab::Buy => SideTab::Sell,
            SideTab::Sell => SideTab::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub search: String,
    pub status: StatusFilter,
    pub side: SideTab,
}

impl OrderQuery {
    pub fn matches(&self, order: &OrderRecord) -> bool {
        let needle = self.search.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&needle);
        (hit(&order.asset) || hit(&order.symbol) || hit(&order.id))
            && self.status.matches(order.status)
            && self.side.matches(order.side)
    }
}

/// Summary cards above the order table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Sum of completed order totals
    pub volume: Btc,
}

impl OrderStats {
    pub fn volume_display(&self) -> String {
        self.volume.fixed(3)
    }
}

/// Orders visible to the current session, newest first
#[derive(Debug, Clone)]
pub struct OrderBook {
    orders: Vec<OrderRecord>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::seeded()
    }
}

impl OrderBook {
    pub fn seeded() -> Self {
        Self::with_orders(seed_orders())
    }

    pub fn with_orders(orders: Vec<OrderRecord>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    /// Record a newly submitted order at the top of the list
    pub fn push(&mut self, order: OrderRecord) {
        tracing::debug!(order_id = %order.id, "order added to book");
        self.orders.insert(0, order);
    }

    pub fn get(&self, id: &str) -> Option<&OrderRecord> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn filter(&self, query: &OrderQuery) -> Vec<&OrderRecord> {
        self.orders.iter().filter(|o| query.matches(o)).collect()
    }

    pub fn stats(&self) -> OrderStats {
        let completed = || {
            self.orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
        };
        OrderStats {
            total: self.orders.len(),
            completed: completed().count(),
            pending: self
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            volume: completed().map(|o| o.total).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn ids(orders: &[&OrderRecord]) -> Vec<String> {
        orders.iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_seeded_stats() {
        let stats = OrderBook::seeded().stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.volume, Btc::scaled(108, 3));
        assert_eq!(stats.volume_display(), "₿0.108");
    }

    #[test]
    fn test_status_filter() {
        let book = OrderBook::seeded();
        let query = OrderQuery {
            status: "failed".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&book.filter(&query)), vec!["ORD-003"]);
    }

    #[test]
    fn test_side_tab_and_search() {
        let book = OrderBook::seeded();
        let sells = OrderQuery {
            side: SideTab::Sell,
            ..Default::default()
        };
        assert_eq!(ids(&book.filter(&sells)), vec!["ORD-002", "ORD-004"]);

        let search = OrderQuery {
            search: "lnft".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&book.filter(&search)), vec!["ORD-005"]);

        let by_id = OrderQuery {
            search: "ord-00".to_string(),
            ..Default::default()
        };
        assert_eq!(book.filter(&by_id).len(), 5);
    }

    #[test]
    fn test_push_puts_new_order_first() {
        let mut book = OrderBook::seeded();
        let mut order = book.orders()[0].clone();
        order.id = "ORD-1700000000000".to_string();
        order.status = OrderStatus::Processing;
        order.amount = Decimal::from(3);
        order.date = Utc::now();
        book.push(order);

        assert_eq!(book.orders()[0].id, "ORD-1700000000000");
        assert!(book.get("ORD-1700000000000").is_some());
        assert_eq!(book.stats().total, 6);
        assert_eq!(book.stats().completed, 2);
    }

    #[test]
    fn test_status_filter_cycles() {
        let mut filter = StatusFilter::All;
        for _ in 0..OrderStatus::all().len() {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::Only(OrderStatus::Cancelled));
        assert_eq!(filter.next(), StatusFilter::All);
    }
}
