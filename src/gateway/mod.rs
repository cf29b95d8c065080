//! Gateways to the upstream dropshipping supplier.

pub mod catalog;
pub mod demo;
pub mod orders;

pub use catalog::{CatalogGateway, CatalogPage};
pub use orders::{OrderAck, OrderError, OrderGateway, OrderLine, OrderRequest, ShippingAddress};
