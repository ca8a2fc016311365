use std::collections::HashMap;

use iced::{
    widget::{self, column, row},
    Element, Length,
};
use uuid::Uuid;

use crate::{
    app::Section,
    error::Fetched,
    models::{Deck, NewDeck, SynergyScore},
    session::Session,
    task::Task,
};

use super::Effect;

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    Create,
    Created(Fetched<Deck>),
    Loaded(Fetched<Vec<Deck>>),
    SynergyLoaded(Uuid, Fetched<SynergyScore>),
    Open(Uuid),
    Delete(Uuid),
    Deleted(Uuid, Fetched<()>),
    SignOut,
}

/// The signed-in user's decks with their synergy scores.
#[derive(Debug)]
pub struct Decks {
    user_id: Uuid,
    username: String,
    decks: Vec<Deck>,
    synergy: HashMap<Uuid, String>,
    new_deck_name: String,
    loading: bool,
}

impl Decks {
    /// `None` when nobody is signed in.
    pub fn open(session: &Session) -> Option<(Self, Vec<Effect>)> {
        let user = session.user()?;

        let decks = Self {
            user_id: user.id,
            username: user.username.clone(),
            decks: Vec::new(),
            synergy: HashMap::new(),
            new_deck_name: String::new(),
            loading: true,
        };
        let effects = vec![Effect::Run(Task::LoadDecks { user_id: user.id })];

        Some((decks, effects))
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn synergy(&self, deck_id: Uuid) -> Option<&str> {
        self.synergy.get(&deck_id).map(String::as_str)
    }

    fn reload(&mut self) -> Vec<Effect> {
        self.loading = true;
        vec![Effect::Run(Task::LoadDecks {
            user_id: self.user_id,
        })]
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::NameChanged(name) => self.new_deck_name = name,
            Message::Create => {
                let name = self.new_deck_name.trim();
                if name.is_empty() {
                    return Vec::new();
                }
                return vec![Effect::Run(Task::CreateDeck(NewDeck {
                    user_id: self.user_id,
                    name: name.to_owned(),
                }))];
            }
            Message::Created(Ok(deck)) => {
                tracing::info!(deck_id = %deck.id, name = %deck.name, "deck created");
                self.new_deck_name.clear();
                return self.reload();
            }
            Message::Created(Err(err)) => {
                tracing::error!(error = %err, name = %self.new_deck_name, "creating deck failed")
            }
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(decks) => {
                        self.decks = decks;
                        let ids: Vec<Uuid> = self.decks.iter().map(|d| d.id).collect();
                        self.synergy.retain(|id, _| ids.contains(id));

                        return ids
                            .into_iter()
                            .map(|deck_id| Effect::Run(Task::LoadSynergy { deck_id }))
                            .collect();
                    }
                    Err(err) => {
                        tracing::error!(error = %err, user_id = %self.user_id, "fetching decks failed")
                    }
                }
            }
            Message::SynergyLoaded(deck_id, result) => match result {
                Ok(score) => {
                    if self.decks.iter().any(|d| d.id == deck_id) {
                        self.synergy.insert(deck_id, score.synergy_score);
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, %deck_id, "fetching synergy score failed")
                }
            },
            Message::Open(deck_id) => return vec![Effect::Navigate(Section::DeckBuilder(deck_id))],
            Message::Delete(deck_id) => {
                return vec![Effect::Run(Task::DeleteDeck { deck_id })];
            }
            Message::Deleted(deck_id, result) => match result {
                Ok(()) => {
                    self.decks.retain(|d| d.id != deck_id);
                    self.synergy.remove(&deck_id);
                }
                Err(err) => tracing::error!(error = %err, %deck_id, "deleting deck failed"),
            },
            Message::SignOut => return vec![Effect::SignOut, Effect::Navigate(Section::Login)],
        }

        Vec::new()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let field_name = widget::text_input("Deck name", &self.new_deck_name)
            .on_input(Message::NameChanged)
            .on_submit(Message::Create)
            .width(Length::Fixed(240.));
        let btn_new = widget::button("New").on_press(Message::Create);
        let txt_user = widget::text(format!("Signed in as {}", self.username)).width(Length::Fill);
        let btn_sign_out = widget::button("Sign out").on_press(Message::SignOut);

        let row_top = row!(field_name, btn_new, txt_user, btn_sign_out).spacing(10);

        let list: Element<'_, Message> = if self.loading && self.decks.is_empty() {
            widget::text("Loading...").into()
        } else {
            widget::scrollable(
                widget::column(self.decks().iter().map(|d| self.view_deck(d))).spacing(10),
            )
            .width(Length::Fill)
            .into()
        };

        column!(row_top, list).spacing(20).padding(20).into()
    }

    fn view_deck<'a>(&'a self, deck: &'a Deck) -> Element<'a, Message> {
        let txt_name = widget::text(&deck.name).width(Length::Fill);
        let txt_synergy = widget::text(format!(
            "Synergy: {}",
            self.synergy(deck.id).unwrap_or("-")
        ));
        let btn_open = widget::button("Build").on_press(Message::Open(deck.id));
        let btn_delete = widget::button("Delete").on_press(Message::Delete(deck.id));

        row!(txt_name, txt_synergy, btn_open, btn_delete)
            .spacing(10)
            .into()
    }
}
