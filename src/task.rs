use std::{sync::Arc, time::Duration};

use uuid::Uuid;

use crate::{
    app::AppMessage,
    browser::{CatalogQuery, CatalogRequest},
    catalog::{CardCatalog, ScryfallCatalog},
    config::Config,
    deck_service::{DeckService, HttpDeckService},
    error::{ApiResult, FetchFailed},
    http,
    models::{NewDeck, NewDeckCard, NewUser, SavedCard, Visual},
    screens::{builder, decks, login, register},
};

/// Remote work requested by a screen. Each variant is one user action's
/// worth of calls; its outcome comes back as exactly one message.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    FindUser { email: String },
    Register(NewUser),
    RegistrationNotice(Duration),
    LoadDecks { user_id: Uuid },
    LoadSynergy { deck_id: Uuid },
    CreateDeck(NewDeck),
    DeleteDeck { deck_id: Uuid },
    LoadSavedCards { deck_id: Uuid },
    FetchCards(CatalogRequest),
    AddCard {
        deck_id: Uuid,
        card_id: String,
        visual: Visual,
    },
    DownloadImage(String),
}

#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CardCatalog>,
    pub decks: Arc<dyn DeckService>,
    pub default_query: String,
}

impl Services {
    pub fn over_http(config: &Config) -> ApiResult<Self> {
        let client = http::build_client()?;

        Ok(Self {
            catalog: Arc::new(ScryfallCatalog::new(
                config.catalog_api.clone(),
                client.clone(),
            )),
            decks: Arc::new(HttpDeckService::new(config.deck_api.clone(), client)),
            default_query: config.default_query.clone(),
        })
    }
}

pub async fn execute(task: Task, services: Services) -> AppMessage {
    match task {
        Task::FindUser { email } => {
            let result = services.decks.user_by_email(&email).await;
            AppMessage::Login(login::Message::Found(result.map_err(FetchFailed::from)))
        }
        Task::Register(user) => {
            let result = services.decks.register(&user).await;
            AppMessage::Register(register::Message::Registered(
                result.map_err(FetchFailed::from),
            ))
        }
        Task::RegistrationNotice(delay) => {
            tokio::time::sleep(delay).await;
            AppMessage::Register(register::Message::NoticeElapsed)
        }
        Task::LoadDecks { user_id } => {
            let result = services.decks.decks_for_user(user_id).await;
            AppMessage::Decks(decks::Message::Loaded(result.map_err(FetchFailed::from)))
        }
        Task::LoadSynergy { deck_id } => {
            let result = services.decks.synergy_score(deck_id).await;
            AppMessage::Decks(decks::Message::SynergyLoaded(
                deck_id,
                result.map_err(FetchFailed::from),
            ))
        }
        Task::CreateDeck(deck) => {
            let result = services.decks.create_deck(&deck).await;
            AppMessage::Decks(decks::Message::Created(result.map_err(FetchFailed::from)))
        }
        Task::DeleteDeck { deck_id } => {
            let result = services.decks.delete_deck(deck_id).await;
            AppMessage::Decks(decks::Message::Deleted(
                deck_id,
                result.map_err(FetchFailed::from),
            ))
        }
        Task::LoadSavedCards { deck_id } => {
            let result = load_saved_cards(&services, deck_id).await;
            AppMessage::Builder(builder::Message::SavedLoaded(
                result.map_err(FetchFailed::from),
            ))
        }
        Task::FetchCards(request) => {
            let result = match &request.query {
                CatalogQuery::FirstPage => services.catalog.search(&services.default_query).await,
                CatalogQuery::NextPage(cursor) => services.catalog.page(cursor).await,
                CatalogQuery::Search(term) => services.catalog.search(term).await,
            };
            AppMessage::Builder(builder::Message::CardsFetched(
                request.ticket,
                result.map_err(FetchFailed::from),
            ))
        }
        Task::AddCard {
            deck_id,
            card_id,
            visual,
        } => {
            let body = NewDeckCard {
                card_id,
                quantity: 1,
            };
            let result = services.decks.add_deck_card(deck_id, &body).await;
            AppMessage::Builder(builder::Message::CardAdded(
                visual,
                result.map_err(FetchFailed::from),
            ))
        }
        Task::DownloadImage(url) => {
            let bytes = match services.catalog.image(&url).await {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    tracing::warn!(%url, error = %err, "downloading card image failed");
                    None
                }
            };
            AppMessage::ImageLoaded(url, bytes)
        }
    }
}

/// The deck's stored entries, each resolved against the catalog. One failed
/// lookup fails the whole load.
async fn load_saved_cards(services: &Services, deck_id: Uuid) -> ApiResult<Vec<SavedCard>> {
    let entries = services.decks.deck_cards(deck_id).await?;

    let mut saved = Vec::with_capacity(entries.len());
    for entry in entries {
        let card = services.catalog.card(&entry.card_id).await?;
        saved.push(SavedCard { entry, card });
    }

    Ok(saved)
}
