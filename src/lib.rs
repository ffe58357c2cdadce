//! Terminal gallery for the Holo Hub video feed.
//!
//! The feed document is fetched once, then filtered by category and shown
//! in an order that stays stable for an hour across restarts.

pub mod app;
pub mod config;
pub mod feed;
pub mod gallery;
pub mod lifecycle;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
