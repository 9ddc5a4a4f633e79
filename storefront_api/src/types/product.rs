use serde::{Deserialize, Serialize};

/// A catalog product as returned by the API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
}

/// Payload for creating a product.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
}

/// Partial update for an existing product; `id` selects the target and the
/// remaining fields overwrite only when present.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProductUpdate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Variables for delete mutations. Travels in the request body, per the
/// transport's delete-with-body convention.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeleteRequest {
    pub id: String,
}

/// Server acknowledgement for a delete.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeleteReceipt {
    pub success: bool,
}
