//! Search, filter and sort over catalog listings.

use std::fmt;
use std::str::FromStr;

use crate::types::{Asset, AssetCategory, Holding, Node};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `all` or a single asset category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(AssetCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: AssetCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// Cycle through `all` and every category, for the filter key in the TUI
    pub fn next(self) -> Self {
        let categories = AssetCategory::all();
        match self {
            CategoryFilter::All => CategoryFilter::Only(categories[0]),
            CategoryFilter::Only(c) => categories
                .iter()
                .position(|x| *x == c)
                .and_then(|i| categories.get(i + 1))
                .map_or(CategoryFilter::All, |c| CategoryFilter::Only(*c)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Asset discovery sort keys, all descending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssetSort {
    #[default]
    MarketCap,
    Volume,
    Price,
    Change,
}

impl AssetSort {
    pub fn all() -> &'static [AssetSort] {
        &[
            AssetSort::MarketCap,
            AssetSort::Volume,
            AssetSort::Price,
            AssetSort::Change,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            AssetSort::MarketCap => "market_cap",
            AssetSort::Volume => "volume",
            AssetSort::Price => "price",
            AssetSort::Change => "change",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetSort::MarketCap => "Market Cap",
            AssetSort::Volume => "Volume",
            AssetSort::Price => "Price",
            AssetSort::Change => "24h Change",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|s| *s == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }
}

impl fmt::Display for AssetSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AssetSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        AssetSort::all()
            .iter()
            .copied()
            .find(|sort| sort.id().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: AssetSort,
}

impl AssetQuery {
    pub fn matches(&self, asset: &Asset) -> bool {
        (contains_ci(&asset.name, &self.search) || contains_ci(&asset.symbol, &self.search))
            && self.category.matches(asset.category)
    }

    pub fn apply<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        let mut found: Vec<&Asset> = assets.iter().filter(|a| self.matches(a)).collect();
        found.sort_by(|a, b| match self.sort {
            AssetSort::MarketCap => b.market_cap.cmp(&a.market_cap),
            AssetSort::Volume => b.volume.cmp(&a.volume),
            AssetSort::Price => b.price.cmp(&a.price),
            AssetSort::Change => b.change_pct.cmp(&a.change_pct),
        });
        found
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeQuery {
    pub search: String,
}

impl NodeQuery {
    pub fn matches(&self, node: &Node) -> bool {
        contains_ci(&node.name, &self.search)
            || contains_ci(&node.alias, &self.search)
            || contains_ci(&node.pubkey, &self.search)
    }

    pub fn apply<'a>(&self, nodes: &'a [Node]) -> Vec<&'a Node> {
        nodes.iter().filter(|n| self.matches(n)).collect()
    }
}

/// Portfolio ("Manage Assets") search and type filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl HoldingQuery {
    pub fn matches(&self, holding: &Holding) -> bool {
        (contains_ci(&holding.name, &self.search) || contains_ci(&holding.symbol, &self.search))
            && self.category.matches(holding.category)
    }

    pub fn apply<'a>(&self, holdings: &'a [Holding]) -> Vec<&'a Holding> {
        holdings.iter().filter(|h| self.matches(h)).collect()
    }
}
