//! Orange Pages: a terminal explorer and marketplace for Taproot assets and
//! Lightning nodes.
//!
//! The flow state machines (`flows`), session, navigation and mock data are
//! plain library code; `ui` and `app` drive them from a ratatui event loop.

pub mod app;
pub mod catalog;
pub mod config;
pub mod flows;
pub mod logging;
pub mod navigation;
pub mod orders;
pub mod session;
pub mod types;
pub mod ui;
