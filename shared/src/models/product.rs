//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    /// Unique, compared case-sensitively
    pub sku: String,
    pub price: f64,
    pub cut_price: Option<f64>,
    pub discount: Option<String>,
    #[serde(rename = "stocks")]
    pub stock: i64,
    /// Category reference by title
    pub category: String,
    /// Subcategory reference by title
    pub subcategory: Option<String>,
    pub state: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub tags: Vec<String>,
    pub image: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub thumbnails: Vec<String>,
    pub youtube_video_link: Option<String>,
    /// Owning vendor; admin-created products have none
    pub vendor_id: Option<i64>,
    pub vendor_name: Option<String>,
    pub is_approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A number sent either as JSON number or numeric string
///
/// Form-style clients post `"12"` as often as `12`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parse as a finite float
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Parse as a whole number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => {
                let whole = n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64;
                whole.then_some(*n as i64)
            }
            Self::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Create product payload
///
/// Fields are optional at the serde level so that presence is reported as a
/// domain error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<NumericInput>,
    pub cut_price: Option<NumericInput>,
    pub discount: Option<String>,
    #[serde(rename = "stocks")]
    pub stock: Option<NumericInput>,
    pub sku: Option<String>,
    #[serde(rename = "categories")]
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: Option<String>,
    #[serde(default, rename = "thumbnail")]
    pub thumbnails: Vec<String>,
    pub youtube_video_link: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<NumericInput>,
    pub cut_price: Option<NumericInput>,
    pub discount: Option<String>,
    #[serde(rename = "stocks")]
    pub stock: Option<NumericInput>,
    pub sku: Option<String>,
    #[serde(rename = "categories")]
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub state: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    #[serde(rename = "thumbnail")]
    pub thumbnails: Option<Vec<String>>,
    pub youtube_video_link: Option<String>,
}

/// Product search filters (all optional, combined with AND)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSearch {
    /// Substring of title or description
    pub title: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub tag: Option<String>,
}

/// Product listing with total count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_accepts_numbers_and_strings() {
        let n: NumericInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(n.as_f64(), Some(12.5));
        let s: NumericInput = serde_json::from_str("\" 40 \"").unwrap();
        assert_eq!(s.as_f64(), Some(40.0));
        assert_eq!(s.as_i64(), Some(40));
    }

    #[test]
    fn numeric_input_rejects_garbage() {
        assert_eq!(NumericInput::from("abc").as_f64(), None);
        assert_eq!(NumericInput::from("1.5").as_i64(), None);
        assert_eq!(NumericInput::from(2.5).as_i64(), None);
        assert_eq!(NumericInput::from(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn create_payload_uses_wire_names() {
        let json = r#"{"title":"Mug","stocks":"3","categories":"Kitchen","thumbnail":["a.png"]}"#;
        let create: ProductCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.stock.and_then(|s| s.as_i64()), Some(3));
        assert_eq!(create.category.as_deref(), Some("Kitchen"));
        assert_eq!(create.thumbnails, vec!["a.png".to_string()]);
        assert!(create.tags.is_empty());
    }
}
