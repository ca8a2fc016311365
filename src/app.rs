use bytes::Bytes;
use iced::{executor, Application, Command, Theme};
use uuid::Uuid;

use crate::{
    images::ImageCache,
    screens::{
        builder::{self, Builder},
        decks::{self, Decks},
        login::{self, Login},
        register::{self, Register},
        Effect,
    },
    session::Session,
    task::{self, Services, Task},
};

pub struct App {
    services: Services,
    session: Session,
    screen: Screen,
    images: ImageCache,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Login,
    Register,
    Decks,
    DeckBuilder(Uuid),
}

enum Screen {
    Login(Login),
    Register(Register),
    Decks(Decks),
    Builder(Builder),
}

#[derive(Debug, Clone)]
pub enum AppMessage {
    Login(login::Message),
    Register(register::Message),
    Decks(decks::Message),
    Builder(builder::Message),
    ImageLoaded(String, Option<Bytes>),
}

type AppElement<'a> = iced::Element<'a, AppMessage, Theme, iced::Renderer>;

impl Application for App {
    type Executor = executor::Default;
    type Message = AppMessage;
    type Theme = Theme;
    type Flags = Services;

    fn new(services: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        (
            Self {
                services,
                session: Session::default(),
                screen: Screen::Login(Login::default()),
                images: ImageCache::default(),
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        let section = match self.screen {
            Screen::Login(_) => "login",
            Screen::Register(_) => "register",
            Screen::Decks(_) => "decks",
            Screen::Builder(_) => "deck builder",
        };
        format!("mtg deck builder - {section}")
    }

    fn theme(&self) -> Self::Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        let effects = match (message, &mut self.screen) {
            (AppMessage::Login(message), Screen::Login(screen)) => screen.update(message),
            (AppMessage::Register(message), Screen::Register(screen)) => screen.update(message),
            (AppMessage::Decks(message), Screen::Decks(screen)) => screen.update(message),
            (AppMessage::Builder(message), Screen::Builder(screen)) => screen.update(message),
            (AppMessage::ImageLoaded(url, bytes), _) => {
                self.images.insert(url, bytes);
                return Command::none();
            }
            (message, _) => {
                tracing::debug!(?message, "dropping message for a screen that is gone");
                return Command::none();
            }
        };

        self.apply(effects)
    }

    fn view(&self) -> AppElement<'_> {
        match &self.screen {
            Screen::Login(screen) => screen.view().map(AppMessage::Login),
            Screen::Register(screen) => screen.view().map(AppMessage::Register),
            Screen::Decks(screen) => screen.view().map(AppMessage::Decks),
            Screen::Builder(screen) => screen.view(&self.images).map(AppMessage::Builder),
        }
    }
}

impl App {
    fn apply(&mut self, effects: Vec<Effect>) -> Command<AppMessage> {
        let mut commands = Vec::with_capacity(effects.len());

        for effect in effects {
            match effect {
                Effect::Run(task) => {
                    if let Task::DownloadImage(url) = &task {
                        if !self.images.request(url) {
                            continue;
                        }
                    }
                    let services = self.services.clone();
                    commands.push(Command::perform(task::execute(task, services), |m| m));
                }
                Effect::Navigate(section) => commands.push(self.navigate(section)),
                Effect::SignIn(user) => self.session.sign_in(user),
                Effect::SignOut => self.session.sign_out(),
            }
        }

        Command::batch(commands)
    }

    fn navigate(&mut self, section: Section) -> Command<AppMessage> {
        tracing::debug!(?section, "navigating");

        let (screen, effects) = match section {
            Section::Login => (Screen::Login(Login::default()), Vec::new()),
            Section::Register => (Screen::Register(Register::default()), Vec::new()),
            Section::Decks => match Decks::open(&self.session) {
                Some((screen, effects)) => (Screen::Decks(screen), effects),
                None => (Screen::Login(Login::default()), Vec::new()),
            },
            Section::DeckBuilder(deck_id) => match Builder::open(&self.session, deck_id) {
                Some((screen, effects)) => (Screen::Builder(screen), effects),
                None => (Screen::Login(Login::default()), Vec::new()),
            },
        };

        self.screen = screen;
        self.apply(effects)
    }
}
