use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set, Unchanged};

use models::product;

use crate::errors::ServiceError;
use crate::product::domain::{Product, ProductDetails, ProductId};
use crate::product::repository::ProductRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        let found = product::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Product::from))
    }

    async fn insert(&self, details: ProductDetails) -> Result<Product, ServiceError> {
        let am = product::ActiveModel {
            id: NotSet,
            name: Set(details.name),
            description: Set(details.description),
            price: Set(details.price),
        };
        let created = am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(created.into())
    }

    async fn update(&self, p: Product) -> Result<Product, ServiceError> {
        let id = p.id;
        let am = product::ActiveModel {
            id: Unchanged(id),
            name: Set(p.name),
            description: Set(p.description),
            price: Set(p.price),
        };
        match am.update(&self.db).await {
            Ok(updated) => Ok(updated.into()),
            // Depending on RETURNING support the ORM reports a missing row either way.
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Err(ServiceError::not_found("product", id)),
            Err(e) => Err(ServiceError::Db(e.to_string())),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn product_crud_repository() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        assert!(repo.find_all().await?.is_empty());

        let created = repo.insert(ProductDetails::new("chair", "oak", Some(80.0))).await?;
        let found = repo.find_by_id(created.id).await?.unwrap();
        assert_eq!(found, created);

        let mut changed = found.clone();
        changed.apply(ProductDetails::new("stool", "pine", None));
        let updated = repo.update(changed).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "stool");
        assert_eq!(updated.price, None);

        assert!(repo.delete(created.id).await?);
        assert!(!repo.delete(created.id).await?);
        assert!(repo.find_by_id(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        let err = repo
            .update(Product::from_details(999, ProductDetails::new("ghost", "", None)))
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
        assert!(repo.find_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        let mut ids = Vec::new();
        for name in ["pen", "ink", "paper"] {
            ids.push(repo.insert(ProductDetails::new(name, "", Some(1.0))).await?.id);
        }
        let listed: Vec<_> = repo.find_all().await?.into_iter().map(|p| p.id).collect();
        assert_eq!(listed, ids);
        Ok(())
    }
}
