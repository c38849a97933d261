//! Category and Subcategory Models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    /// Unique; products reference categories by this title
    #[serde(rename = "categoriesTitle")]
    pub title: String,
    pub link: Option<String>,
    pub image: Option<String>,
    pub status: CategoryStatus,
    pub is_header_category: bool,
    pub is_collection_category: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    #[serde(rename = "categoriesTitle")]
    pub title: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub status: Option<CategoryStatus>,
    pub is_header_category: Option<bool>,
    pub is_collection_category: Option<bool>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: Option<i64>,
    #[serde(rename = "categoriesTitle")]
    pub title: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub status: Option<CategoryStatus>,
    pub is_header_category: Option<bool>,
    pub is_collection_category: Option<bool>,
}

/// Category with its subcategories and product count (list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithDetails {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
    pub product_count: i64,
}

/// Subcategory entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Subcategory {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create subcategory payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryCreate {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub image: Option<String>,
}
