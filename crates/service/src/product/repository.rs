use async_trait::async_trait;

use super::domain::{Product, ProductDetails, ProductId};
use crate::errors::ServiceError;

/// Repository abstraction for product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, ascending by id.
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ServiceError>;
    /// Insert a new row; the store assigns the id.
    async fn insert(&self, details: ProductDetails) -> Result<Product, ServiceError>;
    /// Overwrite the mutable fields of row `product.id`. `NotFound` if there is no such row.
    async fn update(&self, product: Product) -> Result<Product, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: BTreeMap<ProductId, Product>,
        last_id: ProductId,
    }

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        state: Mutex<State>,
    }

    impl InMemoryProductRepository {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
            let state = self.state.lock().await;
            Ok(state.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
            let state = self.state.lock().await;
            Ok(state.rows.get(&id).cloned())
        }

        async fn insert(&self, details: ProductDetails) -> Result<Product, ServiceError> {
            let mut state = self.state.lock().await;
            state.last_id += 1;
            let product = Product::from_details(state.last_id, details);
            state.rows.insert(product.id, product.clone());
            Ok(product)
        }

        async fn update(&self, product: Product) -> Result<Product, ServiceError> {
            let mut state = self.state.lock().await;
            match state.rows.get_mut(&product.id) {
                Some(row) => {
                    *row = product.clone();
                    Ok(product)
                }
                None => Err(ServiceError::not_found("product", product.id)),
            }
        }

        async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
            let mut state = self.state.lock().await;
            Ok(state.rows.remove(&id).is_some())
        }
    }

}
