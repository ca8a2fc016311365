//! Scripted stand-ins for the remote services and a log capture for
//! asserting on what was reported.

use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use uuid::Uuid;

use crate::{
    app::AppMessage,
    catalog::CardCatalog,
    deck_service::DeckService,
    error::{ApiError, ApiResult},
    models::{
        CatalogCard, CatalogPage, Deck, DeckCard, NewDeck, NewDeckCard, NewUser, SynergyScore,
        User,
    },
    screens::Effect,
    task::{self, Services, Task},
};

pub fn services(catalog: Arc<FakeCatalog>, decks: Arc<FakeDeckService>) -> Services {
    Services {
        catalog,
        decks,
        default_query: "cmc=1".to_owned(),
    }
}

pub fn catalog_card(id: &str, name: &str) -> CatalogCard {
    CatalogCard {
        id: id.to_owned(),
        name: name.to_owned(),
        image_uris: None,
    }
}

pub fn user() -> User {
    User {
        id: Uuid::new_v4(),
        username: "nissa".to_owned(),
        email: "nissa@example.com".to_owned(),
        password_hash: "opaque".to_owned(),
    }
}

/// A genuine transport-level failure: the request never leaves the client.
pub fn network_error() -> ApiError {
    match reqwest::Client::new().get("http://[::1").build() {
        Ok(_) => panic!("malformed url unexpectedly built"),
        Err(err) => ApiError::Reqwest(err),
    }
}

/// Run every task in `effects` (images excluded) and hand back the
/// resulting messages alongside the effects that were not tasks.
pub async fn run_tasks(effects: Vec<Effect>, services: &Services) -> (Vec<AppMessage>, Vec<Effect>) {
    let mut messages = Vec::new();
    let mut rest = Vec::new();

    for effect in effects {
        match effect {
            Effect::Run(Task::DownloadImage(_)) => {}
            Effect::Run(task) => messages.push(task::execute(task, services.clone()).await),
            other => rest.push(other),
        }
    }

    (messages, rest)
}

#[derive(Default)]
pub struct FakeCatalog {
    pages: Mutex<VecDeque<ApiResult<CatalogPage>>>,
    cards: HashMap<String, CatalogCard>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    /// Each `search`/`page` call consumes the next scripted page.
    pub fn with_pages(pages: Vec<ApiResult<CatalogPage>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn with_card(mut self, card: CatalogCard) -> Self {
        self.cards.insert(card.id.clone(), card);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next_page(&self, call: String) -> ApiResult<CatalogPage> {
        self.calls.lock().unwrap().push(call);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Status(StatusCode::NOT_FOUND)))
    }
}

#[async_trait]
impl CardCatalog for FakeCatalog {
    async fn search(&self, query: &str) -> ApiResult<CatalogPage> {
        self.next_page(format!("search:{query}"))
    }

    async fn page(&self, cursor: &str) -> ApiResult<CatalogPage> {
        self.next_page(format!("page:{cursor}"))
    }

    async fn card(&self, id: &str) -> ApiResult<CatalogCard> {
        self.calls.lock().unwrap().push(format!("card:{id}"));
        self.cards
            .get(id)
            .cloned()
            .ok_or(ApiError::Status(StatusCode::NOT_FOUND))
    }

    async fn image(&self, _url: &str) -> ApiResult<Bytes> {
        Err(ApiError::Status(StatusCode::NOT_FOUND))
    }
}

/// In-memory deck backend. Decks live in a vector so creates and deletes
/// are visible to later list calls.
#[derive(Default)]
pub struct FakeDeckService {
    users: Vec<User>,
    decks: Mutex<Vec<Deck>>,
    deck_cards: Vec<DeckCard>,
    fail_writes: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeDeckService {
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_decks(self, decks: Vec<Deck>) -> Self {
        *self.decks.lock().unwrap() = decks;
        self
    }

    pub fn with_deck_cards(mut self, deck_cards: Vec<DeckCard>) -> Self {
        self.deck_cards = deck_cards;
        self
    }

    /// Every mutating call fails with a transport error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn write(&self) -> ApiResult<()> {
        if self.fail_writes {
            return Err(network_error());
        }
        Ok(())
    }
}

#[async_trait]
impl DeckService for FakeDeckService {
    async fn user_by_email(&self, email: &str) -> ApiResult<User> {
        self.record(format!("user_by_email:{email}"));
        self.users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(ApiError::Status(StatusCode::NOT_FOUND))
    }

    async fn register(&self, user: &NewUser) -> ApiResult<()> {
        self.record(format!("register:{}", user.email));
        self.write()
    }

    async fn decks_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Deck>> {
        self.record(format!("decks_for_user:{user_id}"));
        Ok(self
            .decks
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_deck(&self, deck: &NewDeck) -> ApiResult<Deck> {
        self.record(format!("create_deck:{}", deck.name));
        self.write()?;
        let deck = Deck {
            id: Uuid::new_v4(),
            user_id: deck.user_id,
            name: deck.name.clone(),
        };
        self.decks.lock().unwrap().push(deck.clone());
        Ok(deck)
    }

    async fn delete_deck(&self, deck_id: Uuid) -> ApiResult<()> {
        self.record(format!("delete_deck:{deck_id}"));
        self.write()?;
        self.decks.lock().unwrap().retain(|d| d.id != deck_id);
        Ok(())
    }

    async fn synergy_score(&self, deck_id: Uuid) -> ApiResult<SynergyScore> {
        self.record(format!("synergy_score:{deck_id}"));
        Ok(SynergyScore {
            id: 1,
            deck_id,
            synergy_score: "0.75".to_owned(),
            calculated_at: "2024-11-30T12:00:00".to_owned(),
        })
    }

    async fn deck_cards(&self, deck_id: Uuid) -> ApiResult<Vec<DeckCard>> {
        self.record(format!("deck_cards:{deck_id}"));
        Ok(self
            .deck_cards
            .iter()
            .filter(|c| c.deck_id == deck_id)
            .cloned()
            .collect())
    }

    async fn add_deck_card(&self, deck_id: Uuid, card: &NewDeckCard) -> ApiResult<DeckCard> {
        self.record(format!(
            "add_deck_card:{deck_id}:{}:{}",
            card.card_id, card.quantity
        ));
        self.write()?;
        Ok(DeckCard {
            id: 1,
            deck_id,
            card_id: card.card_id.clone(),
            quantity: card.quantity,
        })
    }
}

/// Formatted log output collected in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn errors(&self) -> usize {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|l| l.trim_start().starts_with("ERROR"))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
