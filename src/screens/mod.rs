pub mod builder;
pub mod decks;
pub mod login;
pub mod register;

use crate::{app::Section, models::User, task::Task};

/// What a screen asks the application to do after handling a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Run(Task),
    Navigate(Section),
    SignIn(User),
    SignOut,
}
