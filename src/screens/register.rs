use std::time::Duration;

use iced::{
    widget::{self, column, row},
    Alignment, Element, Length,
};

use crate::{app::Section, error::Fetched, models::NewUser, task::Task};

use super::Effect;

/// How long the confirmation stays up before returning to login.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
    Back,
    Registered(Fetched<()>),
    NoticeElapsed,
}

#[derive(Debug, Default)]
pub struct Register {
    username: String,
    email: String,
    password: String,
    loading: bool,
    registered: bool,
}

impl Register {
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::UsernameChanged(username) => self.username = username,
            Message::EmailChanged(email) => self.email = email,
            Message::PasswordChanged(password) => self.password = password,
            Message::Submit => {
                if self.loading || self.registered {
                    return Vec::new();
                }
                self.loading = true;
                return vec![Effect::Run(Task::Register(NewUser {
                    username: self.username.trim().to_owned(),
                    email: self.email.trim().to_owned(),
                    password_hash: self.password.clone(),
                }))];
            }
            Message::Back => return vec![Effect::Navigate(Section::Login)],
            Message::Registered(result) => {
                self.loading = false;
                match result {
                    Ok(()) => {
                        tracing::info!(username = %self.username, "registration accepted");
                        self.registered = true;
                        return vec![Effect::Run(Task::RegistrationNotice(NOTICE_DURATION))];
                    }
                    Err(err) => {
                        tracing::error!(error = %err, username = %self.username, "registering failed")
                    }
                }
            }
            Message::NoticeElapsed => {
                self.registered = false;
                return vec![Effect::Navigate(Section::Login)];
            }
        }

        Vec::new()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = widget::text("Register").size(32);

        let field_username = widget::text_input("Username", &self.username)
            .on_input(Message::UsernameChanged)
            .width(Length::Fixed(320.));
        let field_password = widget::text_input("Password", &self.password)
            .on_input(Message::PasswordChanged)
            .secure(true)
            .width(Length::Fixed(320.));
        let field_email = widget::text_input("Email", &self.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::Submit)
            .width(Length::Fixed(320.));

        let can_submit = !self.loading && !self.registered;
        let btn_submit =
            widget::button("Register").on_press_maybe(can_submit.then_some(Message::Submit));
        let btn_back = widget::button("Back").on_press(Message::Back);

        let mut content = column!(
            title,
            field_username,
            field_password,
            field_email,
            row!(btn_submit, btn_back).spacing(10)
        )
        .spacing(10)
        .align_items(Alignment::Center);

        if self.registered {
            content = content.push(widget::text("Registered! Returning to login..."));
        }

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}
