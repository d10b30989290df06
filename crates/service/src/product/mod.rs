//! Product module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Product, ProductDetails, ProductId};
pub use repository::ProductRepository;
pub use repo::seaorm::SeaOrmProductRepository;
pub use service::ProductService;
