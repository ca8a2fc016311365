use iced::{
    widget::{self, column, row},
    Alignment, Element, Length,
};

use crate::{app::Section, error::Fetched, models::User, task::Task};

use super::Effect;

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    Submit,
    GoToRegister,
    Found(Fetched<User>),
}

#[derive(Debug, Default)]
pub struct Login {
    email: String,
    loading: bool,
}

impl Login {
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::EmailChanged(email) => self.email = email,
            Message::Submit => {
                let email = self.email.trim();
                if email.is_empty() || self.loading {
                    return Vec::new();
                }
                self.loading = true;
                return vec![Effect::Run(Task::FindUser {
                    email: email.to_owned(),
                })];
            }
            Message::GoToRegister => return vec![Effect::Navigate(Section::Register)],
            Message::Found(result) => {
                self.loading = false;
                match result {
                    Ok(user) => {
                        return vec![Effect::SignIn(user), Effect::Navigate(Section::Decks)]
                    }
                    Err(err) => tracing::error!(error = %err, email = %self.email, "logging in failed"),
                }
            }
        }

        Vec::new()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let field_email = widget::text_input("Email", &self.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::Submit)
            .width(Length::Fixed(320.));

        let btn_login =
            widget::button("Login").on_press_maybe((!self.loading).then_some(Message::Submit));
        let btn_register = widget::button("Register").on_press(Message::GoToRegister);

        let mut content = column!(field_email, row!(btn_login, btn_register).spacing(10))
            .spacing(10)
            .align_items(Alignment::Center);

        if self.loading {
            content = content.push(widget::text("Loading..."));
        }

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}
