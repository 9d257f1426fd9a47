//! Service layer between the console application and the store.

mod phonebook;

pub use phonebook::PhonebookService;
