//! Order submission gateway to the fulfillment supplier.
//!
//! Unlike the catalog read path, submission failures are surfaced: a
//! rejected or unreachable upstream is an error the caller must show to the
//! user, not something to paper over. One attempt per call, no retry.
//!
//! Without a credential the gateway acknowledges orders locally with a
//! `DEMO-` id. That is an explicit, logged stand-in, not a silent failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::config::SupplierConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
}

/// Finalized order as posted by the checkout flow. Fields default when
/// absent from the request body so validation reports them instead of a
/// deserialization failure.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct OrderRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "order_id is required"))]
    pub order_id: String,
    #[serde(default)]
    #[validate(required(message = "shipping_address is required"))]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    #[validate(length(min = 1, message = "at least one line item is required"))]
    pub line_items: Vec<OrderLine>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderAck {
    #[serde(alias = "order_id")]
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub is_demo: bool,
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("invalid order: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("supplier rejected order with status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("supplier request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl OrderError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Clone)]
pub struct OrderGateway {
    http: reqwest::Client,
    config: SupplierConfig,
}

impl OrderGateway {
    pub fn new(config: SupplierConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    /// Validate and submit. Validation runs before any network activity.
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<OrderAck, OrderError> {
        order.validate()?;

        let Some(token) = self.config.api_token.clone() else {
            let ack = OrderAck {
                id: format!("DEMO-{}", Uuid::new_v4()),
                status: "PROCESSING".to_string(),
                is_demo: true,
            };
            tracing::info!(
                order_id = %order.order_id,
                ack_id = %ack.id,
                "no supplier credential configured, acknowledging order in demo mode"
            );
            return Ok(ack);
        };

        let resp = self
            .http
            .post(self.config.endpoint("orders"))
            .bearer_auth(&token)
            .json(order)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OrderError::Upstream { status: status.as_u16(), body });
        }
        let mut ack: OrderAck = resp.json().await?;
        ack.is_demo = false;
        tracing::info!(order_id = %order.order_id, ack_id = %ack.id, "order accepted by supplier");
        Ok(ack)
    }
}
