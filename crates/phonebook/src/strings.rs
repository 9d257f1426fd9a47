//! Fixed text shown by the console application.

pub const APP_HEADER: &str =
    "Welcome to your phone book\nApplication allows you to manage your contacts\n";
pub const CONFIRM_OPERATION: &str = "Please confirm your operation";
pub const PRESS_ANY_KEY: &str = "Press any key to continue...";

pub const CONTACT_COLUMNS: [&str; 5] =
    ["First Name", "Last Name", "Phone Number", "Email", "Category"];
pub const CATEGORY_COLUMNS: [&str; 2] = ["Name", "Contacts"];
pub const NO_CONTACT: &str = "No contact match your criteria";
pub const NO_CATEGORY_ROWS: &str = "No categories defined";
pub const NO_CATEGORY: &str = "Uncategorized";
pub const NO_VALUE: &str = "-";

pub const CONTACT_ENTER_FIRST_NAME: &str = "Enter first name";
pub const CONTACT_ENTER_LAST_NAME: &str = "Enter last name";
pub const CONTACT_ENTER_PHONE_NUMBER: &str = "Enter phone number in format +xxxxxxx";
pub const CONTACT_ENTER_EMAIL: &str = "Enter email address (or enter '-' to leave it blank)";
pub const SELECT_CATEGORY: &str = "Please select category for the contact";
pub const CONTACT_SUMMARY: &str = "Following contact will be added to your phonebook";
pub const CONTACT_UPDATED_SUMMARY: &str = "Updated contact information";
pub const CONTACT_DELETE_SUMMARY: &str = "Following contact will be deleted from your phonebook";
pub const SELECT_CONTACT_TO_UPDATE: &str = "Please select contact to be updated";
pub const SELECT_CONTACT_TO_DELETE: &str = "Please select contact to be deleted";
pub const SELECT_CONTACT_TO_EMAIL: &str = "Please select contact to send an email to";
pub const NO_CONTACTS: &str = "There are no contacts in your phonebook";
pub const NO_EMAIL_CONTACTS: &str = "There are no contacts with an email address";

pub const FILTER_BY_NAME: &str = "Please enter full or part of a contact name (case insensitive)";
pub const FILTER_BY_CATEGORY: &str = "Please select category";

pub const CATEGORY_NEW_NAME: &str =
    "Please enter name of category (alphanumeric words with spaces in between, cannot already exist)";
pub const SELECT_CATEGORY_TO_UPDATE: &str = "Please select category to be updated";
pub const SELECT_CATEGORY_TO_DELETE: &str = "Please select category to be deleted";
pub const CATEGORY_UPDATE_SUMMARY: &str = "Following category will be updated";
pub const CATEGORY_DELETE_SUMMARY: &str = "Following category will be deleted";
pub const NO_CATEGORIES: &str = "There are no categories in your phonebook";

pub const EMAIL_SUBJECT: &str = "Enter email subject";
pub const EMAIL_BODY: &str = "Enter email body";
pub const EMAIL_SENT: &str = "Email sent successfully";
pub const EMAIL_NOT_SENT: &str = "Email not sent, please contact admin";
pub const EMAIL_NOT_CONFIGURED: &str = "Email is not configured, please contact admin";

pub const MENU_CHOOSE_OPTION: &str = "Please select menu option";

pub const CONTACT_ADDED: &str = "Contact added successfully";
pub const CONTACT_NOT_ADDED: &str = "Contact not added, please contact admin";
pub const CONTACT_UPDATED: &str = "Contact updated successfully";
pub const CONTACT_NOT_UPDATED: &str = "Contact not updated, please contact admin";
pub const CONTACT_DELETED: &str = "Contact deleted successfully";
pub const CONTACT_NOT_DELETED: &str = "Contact not deleted, please contact admin";
pub const CATEGORY_ADDED: &str = "Category added successfully";
pub const CATEGORY_NOT_ADDED: &str = "Category not added, please contact admin";
pub const CATEGORY_UPDATED: &str = "Category updated successfully";
pub const CATEGORY_NOT_UPDATED: &str = "Category not updated, please contact admin";
pub const CATEGORY_DELETED: &str = "Category deleted successfully";
pub const CATEGORY_NOT_DELETED: &str = "Category not deleted, please contact admin";
