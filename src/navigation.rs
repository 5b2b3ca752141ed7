//! Views the app can show and how to move between them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::flows::CheckoutSeed;
use crate::types::{Asset, Node, OrderRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewParseError {
    #[error("unknown view '{0}'")]
    Unknown(String),

    #[error("view '{0}' needs a selected item and cannot be opened directly")]
    NeedsPayload(&'static str),
}

/// Stable identifier of a view, independent of its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Dashboard,
    AssetDiscovery,
    NodeExplorer,
    AssetDetails,
    NodeProfile,
    ManageAssets,
    Orders,
    Settings,
    Checkout,
    OrderStatus,
    NodeClaimWizard,
}

impl ViewId {
    pub fn all() -> &'static [ViewId] {
        &[
            ViewId::Dashboard,
            ViewId::AssetDiscovery,
            ViewId::NodeExplorer,
            ViewId::AssetDetails,
            ViewId::NodeProfile,
            ViewId::ManageAssets,
            ViewId::Orders,
            ViewId::Settings,
            ViewId::Checkout,
            ViewId::OrderStatus,
            ViewId::NodeClaimWizard,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard",
            ViewId::AssetDiscovery => "asset-discovery",
            ViewId::NodeExplorer => "node-explorer",
            ViewId::AssetDetails => "asset-details",
            ViewId::NodeProfile => "node-profile",
            ViewId::ManageAssets => "manage-assets",
            ViewId::Orders => "orders",
            ViewId::Settings => "settings",
            ViewId::Checkout => "checkout",
            ViewId::OrderStatus => "order-status",
            ViewId::NodeClaimWizard => "node-claim-wizard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::AssetDiscovery => "Asset Discovery",
            ViewId::NodeExplorer => "Node Explorer",
            ViewId::AssetDetails => "Asset Details",
            ViewId::NodeProfile => "Node Profile",
            ViewId::ManageAssets => "Manage Assets",
            ViewId::Orders => "Orders",
            ViewId::Settings => "Settings",
            ViewId::Checkout => "Checkout",
            ViewId::OrderStatus => "Order Status",
            ViewId::NodeClaimWizard => "Claim Node",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| ViewParseError::Unknown(s.to_string()))
    }
}

/// A view together with the data it shows
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    AssetDiscovery,
    NodeExplorer,
    AssetDetails(Box<Asset>),
    NodeProfile(Box<Node>),
    ManageAssets,
    Orders,
    Settings,
    Checkout(Option<CheckoutSeed>),
    OrderStatus(Box<OrderRecord>),
    NodeClaimWizard,
}

impl View {
    pub fn id(&self) -> ViewId {
        match self {
            View::Dashboard => ViewId::Dashboard,
            View::AssetDiscovery => ViewId::AssetDiscovery,
            View::NodeExplorer => ViewId::NodeExplorer,
            View::AssetDetails(_) => ViewId::AssetDetails,
            View::NodeProfile(_) => ViewId::NodeProfile,
            View::ManageAssets => ViewId::ManageAssets,
            View::Orders => ViewId::Orders,
            View::Settings => ViewId::Settings,
            View::Checkout(_) => ViewId::Checkout,
            View::OrderStatus(_) => ViewId::OrderStatus,
            View::NodeClaimWizard => ViewId::NodeClaimWizard,
        }
    }

    /// Build a view that needs no selected item
    pub fn from_id(id: ViewId) -> Result<Self, ViewParseError> {
        Ok(match id {
            ViewId::Dashboard => View::Dashboard,
            ViewId::AssetDiscovery => View::AssetDiscovery,
            ViewId::NodeExplorer => View::NodeExplorer,
            ViewId::ManageAssets => View::ManageAssets,
            ViewId::Orders => View::Orders,
            ViewId::Settings => View::Settings,
            ViewId::Checkout => View::Checkout(None),
            ViewId::NodeClaimWizard => View::NodeClaimWizard,
            ViewId::AssetDetails | ViewId::NodeProfile | ViewId::OrderStatus => {
                return Err(ViewParseError::NeedsPayload(id.as_str()))
            }
        })
    }

    pub fn asset_details(asset: Asset) -> Self {
        View::AssetDetails(Box::new(asset))
    }

    pub fn node_profile(node: Node) -> Self {
        View::NodeProfile(Box::new(node))
    }

    pub fn order_status(order: OrderRecord) -> Self {
        View::OrderStatus(Box::new(order))
    }

    /// Where the screen's "Back" button leads
    pub fn parent(&self) -> Option<View> {
        match self {
            View::AssetDetails(_) | View::Checkout(_) => Some(View::AssetDiscovery),
            View::NodeProfile(_) => Some(View::NodeExplorer),
            View::OrderStatus(_) => Some(View::Orders),
            View::NodeClaimWizard => Some(View::Dashboard),
            _ => None,
        }
    }
}

impl FromStr for View {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::from_id(s.parse()?)
    }
}

/// One entry of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Go(ViewId),
    ClaimNode,
    Logout,
}

impl SidebarItem {
    pub fn label(&self) -> &'static str {
        match self {
            SidebarItem::Go(id) => id.label(),
            SidebarItem::ClaimNode => "Claim Node",
            SidebarItem::Logout => "Logout",
        }
    }
}

pub const SIDEBAR: [SidebarItem; 8] = [
    SidebarItem::Go(ViewId::Dashboard),
    SidebarItem::Go(ViewId::AssetDiscovery),
    SidebarItem::Go(ViewId::NodeExplorer),
    SidebarItem::Go(ViewId::ManageAssets),
    SidebarItem::Go(ViewId::Orders),
    SidebarItem::Go(ViewId::Settings),
    SidebarItem::ClaimNode,
    SidebarItem::Logout,
];

/// Current view plus sidebar selection
#[derive(Debug, Clone)]
pub struct Navigator {
    current: View,
    sidebar_index: usize,
}

impl Navigator {
    pub fn new(start: View) -> Self {
        let mut navigator = Self {
            current: View::Dashboard,
            sidebar_index: 0,
        };
        navigator.navigate(start);
        navigator
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    pub fn navigate(&mut self, view: View) {
        tracing::debug!(from = %self.current.id(), to = %view.id(), "navigate");
        if let Some(index) = SIDEBAR
            .iter()
            .position(|item| *item == SidebarItem::Go(view.id()))
        {
            self.sidebar_index = index;
        }
        self.current = view;
    }

    /// Follow the current view's "Back" link. Returns false on top-level views.
    pub fn back(&mut self) -> bool {
        match self.current.parent() {
            Some(parent) => {
                self.navigate(parent);
                true
            }
            None => false,
        }
    }

    pub fn sidebar_index(&self) -> usize {
        self.sidebar_index
    }

    pub fn sidebar_selected(&self) -> SidebarItem {
        SIDEBAR[self.sidebar_index]
    }

    pub fn sidebar_next(&mut self) {
        self.sidebar_index = (self.sidebar_index + 1) % SIDEBAR.len();
    }

    pub fn sidebar_prev(&mut self) {
        self.sidebar_index = (self.sidebar_index + SIDEBAR.len() - 1) % SIDEBAR.len();
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(View::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_ids_round_trip() {
        for id in ViewId::all() {
            assert_eq!(id.as_str().parse::<ViewId>().unwrap(), *id);
        }
    }

    #[test]
    fn test_unknown_view_is_error() {
        assert_eq!(
            "login".parse::<ViewId>(),
            Err(ViewParseError::Unknown("login".to_string()))
        );
    }

    #[test]
    fn test_detail_views_need_payload() {
        assert_eq!(
            "node-profile".parse::<View>(),
            Err(ViewParseError::NeedsPayload("node-profile"))
        );
        assert_eq!("checkout".parse::<View>(), Ok(View::Checkout(None)));
    }

    #[test]
    fn test_navigate_tracks_sidebar() {
        let mut nav = Navigator::default();
        nav.navigate(View::Orders);
        assert_eq!(nav.sidebar_selected(), SidebarItem::Go(ViewId::Orders));
        nav.navigate(View::Checkout(None));
        // Non-sidebar views keep the previous highlight
        assert_eq!(nav.sidebar_selected(), SidebarItem::Go(ViewId::Orders));
    }

    #[test]
    fn test_back_follows_parent() {
        let mut nav = Navigator::new(View::NodeClaimWizard);
        assert!(nav.back());
        assert_eq!(nav.current(), &View::Dashboard);
        assert!(!nav.back());
    }

    #[test]
    fn test_sidebar_wraps() {
        let mut nav = Navigator::default();
        nav.sidebar_prev();
        assert_eq!(nav.sidebar_selected(), SidebarItem::Logout);
        nav.sidebar_next();
        assert_eq!(nav.sidebar_index(), 0);
    }
}
