//! PayPal Orders v2 wire types.

use serde::{Deserialize, Serialize};

use crate::ports::OrderRequest;

/// `POST /v1/oauth2/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `POST /v2/checkout/orders` request body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderBody<'a> {
    pub intent: &'static str,
    pub purchase_units: Vec<PurchaseUnit<'a>>,
    pub application_context: ApplicationContext<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseUnit<'a> {
    pub reference_id: &'a str,
    pub amount: Amount<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Amount<'a> {
    pub currency_code: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationContext<'a> {
    pub shipping_preference: &'static str,
    pub brand_name: &'a str,
    pub user_action: &'static str,
}

impl<'a> CreateOrderBody<'a> {
    /// Single-unit, capture-intent order for digital goods.
    pub fn for_request(request: &'a OrderRequest, brand_name: &'a str) -> Self {
        Self {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                reference_id: request.product_id.as_str(),
                amount: Amount {
                    currency_code: &request.price.currency,
                    value: &request.price.amount,
                },
            }],
            application_context: ApplicationContext {
                shipping_preference: "NO_SHIPPING",
                brand_name,
                user_action: "PAY_NOW",
            },
        }
    }
}
