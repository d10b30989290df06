use std::sync::Arc;

use configs::DatabaseConfig;
use models::db::{connect_with_config, ensure_schema};
use service::product::repository::mock::InMemoryProductRepository;
use service::product::{ProductRepository, SeaOrmProductRepository};
use service::{ProductDetails, ProductService};

async fn seaorm_service() -> anyhow::Result<ProductService<SeaOrmProductRepository>> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    ensure_schema(&db).await?;
    Ok(ProductService::new(Arc::new(SeaOrmProductRepository::new(db))))
}

fn memory_service() -> ProductService<InMemoryProductRepository> {
    ProductService::new(Arc::new(InMemoryProductRepository::new()))
}

async fn saved_record_round_trips<R: ProductRepository>(svc: &ProductService<R>) -> anyhow::Result<()> {
    let details = ProductDetails::new("Desk lamp", "LED, warm white", Some(34.9));
    let saved = svc.save(None, details.clone()).await?;
    let other = svc.save(None, ProductDetails::new("Bulb", "E27", None)).await?;
    assert_ne!(saved.id, other.id);

    let found = svc.get(saved.id).await?.expect("saved product is retrievable");
    assert_eq!(found.id, saved.id);
    assert_eq!(found.details(), details);
    Ok(())
}

async fn missing_targets_are_not_found<R: ProductRepository>(svc: &ProductService<R>) -> anyhow::Result<()> {
    let kept = svc.save(None, ProductDetails::new("Shelf", "Birch", Some(59.0))).await?;
    let before = svc.list().await?;
    let missing = kept.id + 1_000;

    let err = svc.update(missing, ProductDetails::new("X", "Y", Some(9.99))).await.unwrap_err();
    assert!(err.is_not_found(), "update: {err}");
    let err = svc.delete(missing).await.unwrap_err();
    assert!(err.is_not_found(), "delete: {err}");

    assert_eq!(svc.list().await?, before);
    Ok(())
}

async fn update_touches_only_mutable_fields<R: ProductRepository>(svc: &ProductService<R>) -> anyhow::Result<()> {
    let p = svc.save(None, ProductDetails::new("Old", "Old text", None)).await?;
    let updated = svc.update(p.id, ProductDetails::new("X", "Y", Some(9.99))).await?;
    assert_eq!(updated.id, p.id);
    assert_eq!(updated.details(), ProductDetails::new("X", "Y", Some(9.99)));

    let reread = svc.get(p.id).await?.expect("updated product still present");
    assert_eq!(reread, updated);
    Ok(())
}

async fn delete_removes_everywhere<R: ProductRepository>(svc: &ProductService<R>) -> anyhow::Result<()> {
    let gone = svc.save(None, ProductDetails::new("Gone", "", Some(1.0))).await?;
    let stays = svc.save(None, ProductDetails::new("Stays", "", Some(2.0))).await?;

    svc.delete(gone.id).await?;
    assert!(svc.get(gone.id).await?.is_none());
    let ids: Vec<_> = svc.list().await?.into_iter().map(|p| p.id).collect();
    assert!(!ids.contains(&gone.id));
    assert!(ids.contains(&stays.id));
    Ok(())
}

#[tokio::test]
async fn empty_store_lists_nothing() -> anyhow::Result<()> {
    assert!(memory_service().list().await?.is_empty());
    assert!(seaorm_service().await?.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn in_memory_repository_properties() -> anyhow::Result<()> {
    saved_record_round_trips(&memory_service()).await?;
    missing_targets_are_not_found(&memory_service()).await?;
    update_touches_only_mutable_fields(&memory_service()).await?;
    delete_removes_everywhere(&memory_service()).await?;
    Ok(())
}

#[tokio::test]
async fn seaorm_repository_properties() -> anyhow::Result<()> {
    saved_record_round_trips(&seaorm_service().await?).await?;
    missing_targets_are_not_found(&seaorm_service().await?).await?;
    update_touches_only_mutable_fields(&seaorm_service().await?).await?;
    delete_removes_everywhere(&seaorm_service().await?).await?;
    Ok(())
}

#[tokio::test]
async fn seaorm_save_with_existing_id_overwrites_in_place() -> anyhow::Result<()> {
    let svc = seaorm_service().await?;
    let p = svc.save(None, ProductDetails::new("Cup", "Glass", Some(4.0))).await?;
    let again = svc.save(Some(p.id), ProductDetails::new("Cup", "Tempered glass", Some(4.5))).await?;
    assert_eq!(again.id, p.id);
    assert_eq!(svc.list().await?, vec![again]);
    Ok(())
}

#[tokio::test]
async fn seaorm_service_is_shareable_across_tasks() -> anyhow::Result<()> {
    let svc = Arc::new(seaorm_service().await?);
    let mut handles = Vec::new();
    for i in 0..4 {
        let svc = Arc::clone(&svc);
        handles.push(tokio::spawn(async move {
            svc.save(None, ProductDetails::new(format!("item-{i}"), "", Some(i as f64))).await
        }));
    }
    for h in handles {
        h.await??;
    }
    assert_eq!(svc.list().await?.len(), 4);
    Ok(())
}
