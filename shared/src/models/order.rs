//! Order Model
//!
//! One order is scoped to exactly one vendor. A customer cart spanning
//! several vendors becomes several orders.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Allowed transitions:
///
/// ```text
/// Pending ──► Processing ──► Shipped ──► Delivered
///    │            │
///    └──► Cancelled ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse an exact status name
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Processing" => Some(Self::Processing),
            "Shipped" => Some(Self::Shipped),
            "Delivered" => Some(Self::Delivered),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    PayPal,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "COD")]
    Cod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
}

impl ShippingInfo {
    /// First blank field, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
            ("phoneNumber", &self.phone_number),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Order line with unit price captured at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    #[serde(rename = "product")]
    pub product_id: i64,
    pub quantity: i64,
    #[serde(rename = "price")]
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatusChange {
    pub status: OrderStatus,
    pub changed_at: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// `ORD-<id>`
    #[serde(rename = "orderID")]
    pub order_number: String,
    pub customer_id: String,
    pub vendor_id: i64,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub shipping_info: ShippingInfo,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub payment_info: PaymentInfo,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(rename = "products", default)]
    pub items: Vec<OrderItem>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(rename = "orderHistory", default)]
    pub history: Vec<StatusChange>,
}

/// Cart line as sent by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
}

/// Place order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_id: Option<String>,
    pub products: Option<Vec<CartLineInput>>,
    pub shipping_info: Option<ShippingInfo>,
    pub payment_info: Option<PaymentInfo>,
}

/// Update order status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    #[serde(rename = "orderID")]
    pub order_number: Option<String>,
    pub status: Option<String>,
    /// Required when status is `Delivered`
    pub vendor_id: Option<i64>,
    /// Required when status is `Delivered`
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPayments {
    pub total_amount: f64,
    pub order_count: i64,
}
