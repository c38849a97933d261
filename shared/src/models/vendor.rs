//! Vendor Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum VendorType {
    Vendor,
    Reseller,
}

/// Vendor entity (seller account with wallet)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Vendor {
    pub id: i64,
    pub seller_legal_name: String,
    pub gst_number: Option<String>,
    pub pan_number: String,
    pub pan_card_photo: Option<String>,
    pub gst_certificate: Option<String>,
    pub account_holder_name: String,
    pub account_type: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub vendor_type: VendorType,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    /// argon2 hash, never sent to clients
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub business_name: String,
    pub store_name: Option<String>,
    pub store_category: String,
    pub store_logo: Option<String>,
    pub cover_image: Option<String>,
    pub pin_code: String,
    pub city: String,
    pub address: String,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub wallet_balance: f64,
    pub login_status: bool,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Vendor {
    /// Name shown on products and in tokens
    pub fn display_name(&self) -> String {
        self.store_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} {}", self.first_name, self.last_name))
    }
}

/// Vendor registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRegister {
    pub seller_legal_name: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub pan_card_photo: Option<String>,
    pub gst_certificate: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_type: Option<String>,
    pub account_number: Option<String>,
    pub confirm_account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub vendor_type: Option<VendorType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub business_name: Option<String>,
    pub store_name: Option<String>,
    pub store_category: Option<String>,
    pub store_logo: Option<String>,
    pub cover_image: Option<String>,
    pub pin_code: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
}

/// Login with email or mobile number
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorLogin {
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorLoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub vendor: Vendor,
}
