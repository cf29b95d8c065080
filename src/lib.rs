//! blush-shop
//!
//! Storefront service for a freelance makeup artist's shop.
//!
//! ## Features
//! - Weekday markup pricing (30% markup, Friday sale at cost)
//! - Shopping cart persisted through an injected storage capability
//! - Once-per-day promotional spin wheel with weighted prizes
//! - Catalog gateway over a dropshipping supplier, with a bundled demo
//!   catalog when no credential is configured or the supplier is down
//! - Order submission gateway with an explicit demo acknowledgment mode

pub mod config;
pub mod domain;
pub mod gateway;
pub mod storage;

pub use config::{AppConfig, SupplierConfig};
pub use domain::{Cart, CartLine, PricingContext, Product, PromoWheel};
pub use gateway::{CatalogGateway, CatalogPage, OrderAck, OrderError, OrderGateway, OrderRequest};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
