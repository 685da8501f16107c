//! Per-site product catalog: products and categories.

pub mod categories;
pub mod products;

pub use categories::CategoryManager;
pub use products::ProductManager;
