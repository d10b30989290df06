//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access behind `ProductRepository`.
//! - Ships a SeaORM adapter for real stores and an in-memory one for tests.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use product::{Product, ProductDetails, ProductId, ProductService};
