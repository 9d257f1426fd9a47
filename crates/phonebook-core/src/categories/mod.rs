//! Categories: named groupings of contacts.

mod model;
pub(crate) mod repository;

pub use model::{Category, CategoryId, CategorySummary};
pub use repository::CategoryRepository;
