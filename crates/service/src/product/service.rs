use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Product, ProductDetails, ProductId};
use super::repository::ProductRepository;
use crate::errors::ServiceError;

/// Application service for the product catalogue.
/// Thin orchestration over a `ProductRepository`; adds not-found mapping on update and delete.
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every persisted product. An empty store yields an empty vec.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.repo.find_all().await?;
        debug!(count = products.len(), "products_listed");
        Ok(products)
    }

    /// Absent products are `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Persist a product, creating or overwriting it.
    ///
    /// - `id == None` inserts and the store assigns the id.
    /// - `id` naming an existing row overwrites that row.
    /// - `id` naming no row inserts a new record under a fresh id.
    ///
    /// # Examples
    /// ```
    /// use service::product::{ProductService, ProductDetails, repository::mock::InMemoryProductRepository};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let saved = tokio_test::block_on(svc.save(None, ProductDetails::new("Mug", "Stoneware", Some(7.5)))).unwrap();
    /// let found = tokio_test::block_on(svc.get(saved.id)).unwrap().unwrap();
    /// assert_eq!(found.name, "Mug");
    /// ```
    #[instrument(skip(self, details), fields(name = %details.name))]
    pub async fn save(&self, id: Option<ProductId>, details: ProductDetails) -> Result<Product, ServiceError> {
        let existing = match id {
            Some(id) => self.repo.find_by_id(id).await?,
            None => None,
        };
        let saved = match existing {
            Some(mut product) => {
                product.apply(details);
                self.repo.update(product).await?
            }
            None => {
                if let Some(requested) = id {
                    debug!(requested_id = requested, "save_target_missing_inserting_new");
                }
                self.repo.insert(details).await?
            }
        };
        info!(product_id = saved.id, "product_saved");
        Ok(saved)
    }

    /// Overwrite name, description and price of an existing product.
    ///
    /// # Examples
    /// ```
    /// use service::product::{ProductService, ProductDetails, repository::mock::InMemoryProductRepository};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let err = tokio_test::block_on(svc.update(1, ProductDetails::new("X", "Y", Some(9.99)))).unwrap_err();
    /// assert!(err.is_not_found());
    /// ```
    #[instrument(skip(self, details))]
    pub async fn update(&self, id: ProductId, details: ProductDetails) -> Result<Product, ServiceError> {
        let mut product = self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))?;
        product.apply(details);
        let updated = self.repo.update(product).await?;
        info!(product_id = updated.id, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let product = self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))?;
        // Removed by someone else between the lookup and the delete.
        if !self.repo.delete(product.id).await? {
            return Err(ServiceError::not_found("product", id));
        }
        info!(product_id = id, "product_deleted");
        Ok(())
    }
}
