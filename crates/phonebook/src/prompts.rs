//! Multi-step prompts that build contacts and categories from user input.

use anyhow::Result;
use phonebook_core::validation::{
    NO_VALUE, parse_optional_email, validate_category_name, validate_optional_email,
    validate_phone_number, validate_text,
};
use phonebook_core::{Category, Contact};

use crate::console::Console;
use crate::render;
use crate::strings;

/// Reads every field of a new contact.
pub fn new_contact(console: &mut dyn Console, categories: &[Category]) -> Result<Contact> {
    let first_name = console.input(strings::CONTACT_ENTER_FIRST_NAME, None, &validate_text)?;
    let last_name = console.input(strings::CONTACT_ENTER_LAST_NAME, None, &validate_text)?;
    let phone_number = console.input(
        strings::CONTACT_ENTER_PHONE_NUMBER,
        None,
        &validate_phone_number,
    )?;
    let email = console.input(strings::CONTACT_ENTER_EMAIL, None, &validate_optional_email)?;
    let category = select_category(console, strings::SELECT_CATEGORY, categories, true, None)?;

    let mut contact = Contact::new(first_name, last_name, phone_number);
    contact.email = parse_optional_email(&email);
    contact.set_category(category.as_ref());
    Ok(contact)
}

/// Reads every field of `contact` again, offering the current values.
pub fn updated_contact(
    console: &mut dyn Console,
    contact: &Contact,
    categories: &[Category],
) -> Result<Contact> {
    let first_name = console.input(
        strings::CONTACT_ENTER_FIRST_NAME,
        Some(&contact.first_name),
        &validate_text,
    )?;
    let last_name = console.input(
        strings::CONTACT_ENTER_LAST_NAME,
        Some(&contact.last_name),
        &validate_text,
    )?;
    let phone_number = console.input(
        strings::CONTACT_ENTER_PHONE_NUMBER,
        Some(&contact.phone_number),
        &validate_phone_number,
    )?;
    let email = console.input(
        strings::CONTACT_ENTER_EMAIL,
        Some(contact.email_address().unwrap_or(NO_VALUE)),
        &validate_optional_email,
    )?;
    let current = categories
        .iter()
        .position(|c| contact.category_id.is_some() && c.id == contact.category_id)
        .unwrap_or(categories.len());
    let category = select_category(
        console,
        strings::SELECT_CATEGORY,
        categories,
        true,
        Some(current),
    )?;

    let mut updated = contact.clone();
    updated.first_name = first_name;
    updated.last_name = last_name;
    updated.phone_number = phone_number;
    updated.email = parse_optional_email(&email);
    updated.set_category(category.as_ref());
    Ok(updated)
}

/// Lets the user pick a category.
///
/// With `uncategorized`, an extra "Uncategorized" entry is offered after the
/// categories and choosing it returns `None`. `default` is the index the
/// cursor starts on.
pub fn select_category(
    console: &mut dyn Console,
    prompt: &str,
    categories: &[Category],
    uncategorized: bool,
    default: Option<usize>,
) -> Result<Option<Category>> {
    let mut labels: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    if uncategorized {
        labels.push(strings::NO_CATEGORY.to_string());
    }
    if labels.is_empty() {
        return Ok(None);
    }

    let choice = console.select(prompt, &labels, default)?;
    Ok(categories.get(choice).cloned())
}

/// Lets the user pick one of `contacts`; `None` when the list is empty.
pub fn select_contact(
    console: &mut dyn Console,
    prompt: &str,
    contacts: &[Contact],
) -> Result<Option<Contact>> {
    if contacts.is_empty() {
        return Ok(None);
    }
    let labels: Vec<String> = contacts.iter().map(render::contact_label).collect();
    let choice = console.select(prompt, &labels, None)?;
    Ok(contacts.get(choice).cloned())
}

/// Reads a category name not used by any of `existing`.
///
/// When `renaming` is given, its current name is offered and it is left
/// out of the uniqueness check.
pub fn category_name(
    console: &mut dyn Console,
    existing: &[Category],
    renaming: Option<&Category>,
) -> Result<String> {
    let except = renaming.and_then(|c| c.id);
    let validate = |input: &str| validate_category_name(input, existing, except);
    console.input(
        strings::CATEGORY_NEW_NAME,
        renaming.map(|c| c.name.as_str()),
        &validate,
    )
}
