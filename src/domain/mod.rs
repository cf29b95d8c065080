//! Domain layer: products, pricing, cart, promo wheel.

pub mod cart;
pub mod pricing;
pub mod product;
pub mod value_objects;
pub mod wheel;

pub use cart::{Cart, CartLine};
pub use pricing::{display_price, DisplayPrice, MarkupPolicy, PricingContext};
pub use product::Product;
pub use value_objects::Money;
pub use wheel::{select_prize, Prize, PromoWheel, SpinResult, WheelOutcome, WheelState, PRIZES};
