//! Menu options for each level of the console application.

/// Options in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    ViewContacts,
    AddContact,
    UpdateContact,
    DeleteContact,
    ManageCategories,
    SendEmail,
    Exit,
}

/// Options in the view contacts menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContactsOption {
    ViewAll,
    FilterByName,
    FilterByCategory,
    ReturnToMainMenu,
}

/// Options in the manage categories menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMenuOption {
    ViewCategories,
    AddCategory,
    UpdateCategory,
    DeleteCategory,
    ReturnToMainMenu,
}

/// A closed set of menu options rendered as a selection list.
pub trait MenuOption: Copy + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Text shown for the option.
    fn label(self) -> &'static str;

    /// Labels of [`Self::ALL`], in order.
    fn labels() -> Vec<String> {
        Self::ALL.iter().map(|o| o.label().to_string()).collect()
    }
}

impl MenuOption for MainMenuOption {
    const ALL: &'static [Self] = &[
        Self::ViewContacts,
        Self::AddContact,
        Self::UpdateContact,
        Self::DeleteContact,
        Self::ManageCategories,
        Self::SendEmail,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ViewContacts => "View contacts",
            Self::AddContact => "Add new contact",
            Self::UpdateContact => "Update contact",
            Self::DeleteContact => "Delete contact",
            Self::ManageCategories => "Manage categories",
            Self::SendEmail => "Send email",
            Self::Exit => "Exit",
        }
    }
}

impl MenuOption for ViewContactsOption {
    const ALL: &'static [Self] = &[
        Self::ViewAll,
        Self::FilterByName,
        Self::FilterByCategory,
        Self::ReturnToMainMenu,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ViewAll => "View all contacts",
            Self::FilterByName => "Filter by name",
            Self::FilterByCategory => "Filter by category",
            Self::ReturnToMainMenu => "Return to main menu",
        }
    }
}

impl MenuOption for CategoryMenuOption {
    const ALL: &'static [Self] = &[
        Self::ViewCategories,
        Self::AddCategory,
        Self::UpdateCategory,
        Self::DeleteCategory,
        Self::ReturnToMainMenu,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ViewCategories => "View categories",
            Self::AddCategory => "Add new category",
            Self::UpdateCategory => "Update category",
            Self::DeleteCategory => "Delete category",
            Self::ReturnToMainMenu => "Return to main menu",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_ends_with_its_exit() {
        assert_eq!(MainMenuOption::ALL.last(), Some(&MainMenuOption::Exit));
        assert_eq!(
            ViewContactsOption::ALL.last(),
            Some(&ViewContactsOption::ReturnToMainMenu)
        );
        assert_eq!(
            CategoryMenuOption::ALL.last(),
            Some(&CategoryMenuOption::ReturnToMainMenu)
        );
    }

    #[test]
    fn test_labels_follow_option_order() {
        let labels = CategoryMenuOption::labels();
        assert_eq!(labels.len(), CategoryMenuOption::ALL.len());
        assert_eq!(labels[1], "Add new category");
    }
}
