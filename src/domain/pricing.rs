//! Pricing rule engine.
//!
//! The shop sells at a 30% markup over the supplier's suggested cost. On the
//! weekly sale day (Friday) the markup is waived: the customer pays the
//! suggested cost and the marked-up figure is shown as the crossed-out "was"
//! price. This is the single place price arithmetic happens; everything that
//! displays or charges a price goes through [`display_price`].

use chrono::{Datelike, Local, Weekday};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::product::Product;
use crate::domain::value_objects::Money;

/// Rule converting a wholesale cost into a customer-facing price.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkupPolicy {
    /// Multiplier applied to the suggested cost on non-sale days.
    pub factor: Decimal,
    pub sale_day: Weekday,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        Self { factor: Decimal::new(130, 2), sale_day: Weekday::Fri }
    }
}

/// Evaluation context for a price query. Only the weekday matters; it is
/// recomputed per query and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingContext {
    pub weekday: Weekday,
    pub policy: MarkupPolicy,
}

impl PricingContext {
    pub fn now() -> Self {
        Self::on(Local::now().weekday())
    }

    pub fn on(weekday: Weekday) -> Self {
        Self { weekday, policy: MarkupPolicy::default() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayPrice {
    pub price: Money,
    pub was_price: Option<Money>,
    pub is_discounted: bool,
}

/// Pure price computation: identical (product, weekday) pairs always yield
/// identical output. A cost string that fails to parse prices as zero
/// instead of poisoning the rest of the cart.
pub fn display_price(product: &Product, ctx: &PricingContext) -> DisplayPrice {
    let cost = Decimal::from_str(product.suggested_cost.trim()).unwrap_or(Decimal::ZERO);
    let marked_up = (cost * ctx.policy.factor).round_dp(2);
    if ctx.weekday == ctx.policy.sale_day {
        DisplayPrice {
            price: Money::usd(cost.round_dp(2)),
            was_price: Some(Money::usd(marked_up)),
            is_discounted: true,
        }
    } else {
        DisplayPrice { price: Money::usd(marked_up), was_price: None, is_discounted: false }
    }
}
