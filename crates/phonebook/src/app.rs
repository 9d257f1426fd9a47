//! Menu-driven application loop.

use std::path::Path;

use anyhow::{Result, anyhow};
use phonebook_core::validation::validate_text;
use phonebook_core::{Category, PhonebookService};
use tracing::{debug, info};

use crate::console::Console;
use crate::email::EmailSender;
use crate::menu::{CategoryMenuOption, MainMenuOption, MenuOption, ViewContactsOption};
use crate::prompts;
use crate::render;
use crate::strings;

/// The console application: menus, prompts and the actions behind them.
pub struct App<C> {
    service: PhonebookService,
    email: EmailSender,
    console: C,
}

impl<C: Console> App<C> {
    /// Creates the application.
    pub const fn new(service: PhonebookService, email: EmailSender, console: C) -> Self {
        Self {
            service,
            email,
            console,
        }
    }

    /// Seeds an empty store from `seed_file`, then runs the main menu
    /// until the user exits.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the console fails.
    pub async fn run(&mut self, seed_file: &Path) -> Result<()> {
        let outcome = self.service.auto_seed(seed_file).await;
        debug!("Startup seeding: {outcome:?}");

        loop {
            self.console.clear()?;
            self.console.print(strings::APP_HEADER)?;

            let option = self.choose::<MainMenuOption>()?;
            self.console.clear()?;

            match option {
                MainMenuOption::ViewContacts => self.view_contacts().await?,
                MainMenuOption::AddContact => self.add_contact().await?,
                MainMenuOption::UpdateContact => self.update_contact().await?,
                MainMenuOption::DeleteContact => self.delete_contact().await?,
                MainMenuOption::ManageCategories => self.manage_categories().await?,
                MainMenuOption::SendEmail => self.send_email().await?,
                MainMenuOption::Exit => break,
            }
        }

        info!("Exiting");
        Ok(())
    }

    fn choose<T: MenuOption>(&mut self) -> Result<T> {
        let choice = self
            .console
            .select(strings::MENU_CHOOSE_OPTION, &T::labels(), None)?;
        T::ALL
            .get(choice)
            .copied()
            .ok_or_else(|| anyhow!("menu choice {choice} out of range"))
    }

    async fn view_contacts(&mut self) -> Result<()> {
        loop {
            let contacts = match self.choose::<ViewContactsOption>()? {
                ViewContactsOption::ViewAll => self.service.all_contacts().await,
                ViewContactsOption::FilterByName => {
                    let prefix = self
                        .console
                        .input(strings::FILTER_BY_NAME, None, &validate_text)?;
                    self.service.contacts_starting_with(&prefix).await
                }
                ViewContactsOption::FilterByCategory => {
                    let categories = self.service.all_categories().await;
                    let category = prompts::select_category(
                        &mut self.console,
                        strings::FILTER_BY_CATEGORY,
                        &categories,
                        true,
                        None,
                    )?;
                    self.service
                        .contacts_by_category(category.and_then(|c| c.id))
                        .await
                }
                ViewContactsOption::ReturnToMainMenu => return Ok(()),
            };

            self.console.print(&render::contacts_table(&contacts))?;
            self.console.pause()?;
            self.console.clear()?;
        }
    }

    async fn add_contact(&mut self) -> Result<()> {
        let categories = self.service.all_categories().await;
        let mut contact = prompts::new_contact(&mut self.console, &categories)?;

        self.console
            .print(&render::contact_summary(strings::CONTACT_SUMMARY, &contact))?;
        confirm_and_execute(
            &mut self.console,
            self.service.insert_contact(&mut contact),
            strings::CONTACT_ADDED,
            strings::CONTACT_NOT_ADDED,
        )
        .await
    }

    async fn update_contact(&mut self) -> Result<()> {
        let contacts = self.service.all_contacts().await;
        let Some(contact) = prompts::select_contact(
            &mut self.console,
            strings::SELECT_CONTACT_TO_UPDATE,
            &contacts,
        )?
        else {
            return self.notify(strings::NO_CONTACTS);
        };

        let categories = self.service.all_categories().await;
        let updated = prompts::updated_contact(&mut self.console, &contact, &categories)?;

        self.console.print(&render::contact_summary(
            strings::CONTACT_UPDATED_SUMMARY,
            &updated,
        ))?;
        confirm_and_execute(
            &mut self.console,
            self.service.update_contact(&updated),
            strings::CONTACT_UPDATED,
            strings::CONTACT_NOT_UPDATED,
        )
        .await
    }

    async fn delete_contact(&mut self) -> Result<()> {
        let contacts = self.service.all_contacts().await;
        let Some(contact) = prompts::select_contact(
            &mut self.console,
            strings::SELECT_CONTACT_TO_DELETE,
            &contacts,
        )?
        else {
            return self.notify(strings::NO_CONTACTS);
        };

        self.console.print(&render::contact_summary(
            strings::CONTACT_DELETE_SUMMARY,
            &contact,
        ))?;
        confirm_and_execute(
            &mut self.console,
            self.service.delete_contact(&contact),
            strings::CONTACT_DELETED,
            strings::CONTACT_NOT_DELETED,
        )
        .await
    }

    async fn send_email(&mut self) -> Result<()> {
        let contacts = self.service.contacts_with_email().await;
        let Some(contact) = prompts::select_contact(
            &mut self.console,
            strings::SELECT_CONTACT_TO_EMAIL,
            &contacts,
        )?
        else {
            return self.notify(strings::NO_EMAIL_CONTACTS);
        };
        let Some(address) = contact.email_address() else {
            return self.notify(strings::NO_EMAIL_CONTACTS);
        };

        let sent = self.email.send_email(&mut self.console, address).await?;
        self.notify(if sent {
            strings::EMAIL_SENT
        } else {
            strings::EMAIL_NOT_SENT
        })
    }

    async fn manage_categories(&mut self) -> Result<()> {
        loop {
            match self.choose::<CategoryMenuOption>()? {
                CategoryMenuOption::ViewCategories => {
                    let summaries = self.service.categories_with_counts().await;
                    self.notify(&render::categories_table(&summaries))?;
                }
                CategoryMenuOption::AddCategory => self.add_category().await?,
                CategoryMenuOption::UpdateCategory => self.update_category().await?,
                CategoryMenuOption::DeleteCategory => self.delete_category().await?,
                CategoryMenuOption::ReturnToMainMenu => return Ok(()),
            }
            self.console.clear()?;
        }
    }

    async fn add_category(&mut self) -> Result<()> {
        let categories = self.service.all_categories().await;
        let name = prompts::category_name(&mut self.console, &categories, None)?;
        let mut category = Category::new(name);

        confirm_and_execute(
            &mut self.console,
            self.service.insert_category(&mut category),
            strings::CATEGORY_ADDED,
            strings::CATEGORY_NOT_ADDED,
        )
        .await
    }

    async fn update_category(&mut self) -> Result<()> {
        let categories = self.service.all_categories().await;
        let Some(category) = prompts::select_category(
            &mut self.console,
            strings::SELECT_CATEGORY_TO_UPDATE,
            &categories,
            false,
            None,
        )?
        else {
            return self.notify(strings::NO_CATEGORIES);
        };

        let name = prompts::category_name(&mut self.console, &categories, Some(&category))?;
        let renamed = Category { name, ..category };

        self.console.print(&render::category_summary(
            strings::CATEGORY_UPDATE_SUMMARY,
            &renamed,
        ))?;
        confirm_and_execute(
            &mut self.console,
            self.service.update_category(&renamed),
            strings::CATEGORY_UPDATED,
            strings::CATEGORY_NOT_UPDATED,
        )
        .await
    }

    async fn delete_category(&mut self) -> Result<()> {
        let categories = self.service.all_categories().await;
        let Some(category) = prompts::select_category(
            &mut self.console,
            strings::SELECT_CATEGORY_TO_DELETE,
            &categories,
            false,
            None,
        )?
        else {
            return self.notify(strings::NO_CATEGORIES);
        };

        self.console.print(&render::category_summary(
            strings::CATEGORY_DELETE_SUMMARY,
            &category,
        ))?;
        confirm_and_execute(
            &mut self.console,
            self.service.delete_category(&category),
            strings::CATEGORY_DELETED,
            strings::CATEGORY_NOT_DELETED,
        )
        .await
    }

    fn notify(&mut self, text: &str) -> Result<()> {
        self.console.print(text)?;
        self.console.pause()
    }
}

/// Asks for confirmation, then runs `action` and reports its outcome.
///
/// `action` is not polled when the user declines.
async fn confirm_and_execute(
    console: &mut dyn Console,
    action: impl Future<Output = bool>,
    success: &str,
    failure: &str,
) -> Result<()> {
    if !console.confirm(strings::CONFIRM_OPERATION)? {
        return Ok(());
    }

    let message = if action.await { success } else { failure };
    console.print(message)?;
    console.pause()
}
