//! Plain-text tables and summaries.

use phonebook_core::{Category, CategorySummary, Contact};

use crate::strings;

/// Contacts as a table, or a notice when there are none.
pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return strings::NO_CONTACT.to_string();
    }
    let rows: Vec<Vec<String>> = contacts.iter().map(contact_row).collect();
    table(&strings::CONTACT_COLUMNS, &rows)
}

/// Categories with their contact counts, or a notice when there are none.
pub fn categories_table(summaries: &[CategorySummary]) -> String {
    if summaries.is_empty() {
        return strings::NO_CATEGORY_ROWS.to_string();
    }
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| vec![s.category.name.clone(), s.contact_count.to_string()])
        .collect();
    table(&strings::CATEGORY_COLUMNS, &rows)
}

/// A single contact under a heading.
pub fn contact_summary(heading: &str, contact: &Contact) -> String {
    let row = contact_row(contact);
    let mut out = format!("{heading}\n");
    for (column, value) in strings::CONTACT_COLUMNS.iter().zip(row) {
        out.push_str(&format!("  {column:<14} {value}\n"));
    }
    out
}

/// A single category under a heading.
pub fn category_summary(heading: &str, category: &Category) -> String {
    format!("{heading}\n  {:<14} {}\n", strings::CATEGORY_COLUMNS[0], category.name)
}

/// The label used when listing a contact for selection.
pub fn contact_label(contact: &Contact) -> String {
    format!("{} ({})", contact.full_name(), contact.phone_number)
}

fn contact_row(contact: &Contact) -> Vec<String> {
    vec![
        contact.first_name.clone(),
        contact.last_name.clone(),
        contact.phone_number.clone(),
        contact
            .email_address()
            .unwrap_or(strings::NO_VALUE)
            .to_string(),
        contact
            .category_name
            .clone()
            .unwrap_or_else(|| strings::NO_CATEGORY.to_string()),
    ]
}

fn table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, columns.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
