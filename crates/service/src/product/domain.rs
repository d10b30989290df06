use serde::{Deserialize, Serialize};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// The mutable fields of a product; input for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
}

impl ProductDetails {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Option<f64>) -> Self {
        Self { name: name.into(), description: description.into(), price }
    }
}

/// A persisted product (business view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
}

impl Product {
    pub fn from_details(id: ProductId, details: ProductDetails) -> Self {
        Self { id, name: details.name, description: details.description, price: details.price }
    }

    pub fn details(&self) -> ProductDetails {
        ProductDetails::new(self.name.clone(), self.description.clone(), self.price)
    }

    /// Overwrite name, description and price. The id is untouched.
    pub fn apply(&mut self, details: ProductDetails) {
        self.name = details.name;
        self.description = details.description;
        self.price = details.price;
    }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, price: m.price }
    }
}
