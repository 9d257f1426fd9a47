//! Contacts: the person records of the phonebook.

mod model;
pub(crate) mod repository;

pub use model::{Contact, ContactId};
pub use repository::ContactRepository;
