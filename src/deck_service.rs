use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use uuid::Uuid;

use crate::{
    error::ApiResult,
    http,
    models::{Deck, DeckCard, NewDeck, NewDeckCard, NewUser, SynergyScore, User},
};

/// The user/deck backend. Every method is exactly one HTTP call.
#[async_trait]
pub trait DeckService: Send + Sync {
    async fn user_by_email(&self, email: &str) -> ApiResult<User>;
    async fn register(&self, user: &NewUser) -> ApiResult<()>;
    async fn decks_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Deck>>;
    async fn create_deck(&self, deck: &NewDeck) -> ApiResult<Deck>;
    async fn delete_deck(&self, deck_id: Uuid) -> ApiResult<()>;
    async fn synergy_score(&self, deck_id: Uuid) -> ApiResult<SynergyScore>;
    async fn deck_cards(&self, deck_id: Uuid) -> ApiResult<Vec<DeckCard>>;
    async fn add_deck_card(&self, deck_id: Uuid, card: &NewDeckCard) -> ApiResult<DeckCard>;
}

#[derive(Debug, Clone)]
pub struct HttpDeckService {
    base: Url,
    client: Client,
}

impl HttpDeckService {
    pub fn new(base: Url, client: Client) -> Self {
        Self { base, client }
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        http::join(&self.base, segments)
    }
}

#[async_trait]
impl DeckService for HttpDeckService {
    async fn user_by_email(&self, email: &str) -> ApiResult<User> {
        let url = self.url(&["users", "email", email])?;
        http::fetch_json(self.client.get(url)).await
    }

    async fn register(&self, user: &NewUser) -> ApiResult<()> {
        let url = self.url(&["users", ""])?;
        let response = http::send(self.client.post(url).json(user)).await?;
        tracing::debug!(status = %response.status(), username = %user.username, "registered user");
        Ok(())
    }

    async fn decks_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Deck>> {
        let url = self.url(&["decks", "user", &user_id.to_string()])?;
        http::fetch_json(self.client.get(url)).await
    }

    async fn create_deck(&self, deck: &NewDeck) -> ApiResult<Deck> {
        let url = self.url(&["decks", ""])?;
        http::fetch_json(self.client.post(url).json(deck)).await
    }

    async fn delete_deck(&self, deck_id: Uuid) -> ApiResult<()> {
        let url = self.url(&["decks", &deck_id.to_string()])?;
        http::send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn synergy_score(&self, deck_id: Uuid) -> ApiResult<SynergyScore> {
        let url = self.url(&["decks", &deck_id.to_string(), "synergy-score"])?;
        http::fetch_json(self.client.get(url)).await
    }

    async fn deck_cards(&self, deck_id: Uuid) -> ApiResult<Vec<DeckCard>> {
        let url = self.url(&["decks", &deck_id.to_string(), "cards"])?;
        http::fetch_json(self.client.get(url)).await
    }

    async fn add_deck_card(&self, deck_id: Uuid, card: &NewDeckCard) -> ApiResult<DeckCard> {
        let url = self.url(&["decks", &deck_id.to_string(), "cards"])?;
        http::fetch_json(self.client.post(url).json(card)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> HttpDeckService {
        HttpDeckService::new(
            Url::parse("http://127.0.0.1:8000/api/v1").unwrap(),
            Client::new(),
        )
    }

    #[test]
    fn collection_routes_end_with_slash() {
        let service = service();

        assert_eq!(
            service.url(&["users", ""]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/users/"
        );
        assert_eq!(
            service.url(&["decks", ""]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/decks/"
        );
    }

    #[test]
    fn deck_routes() {
        let service = service();
        let id = Uuid::parse_str("6f1c1f3e-5a55-4b43-9c51-1d2f0f5d9a10").unwrap();
        let id = id.to_string();

        assert_eq!(
            service.url(&["decks", &id, "synergy-score"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/decks/6f1c1f3e-5a55-4b43-9c51-1d2f0f5d9a10/synergy-score"
        );
        assert_eq!(
            service.url(&["decks", "user", &id]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/decks/user/6f1c1f3e-5a55-4b43-9c51-1d2f0f5d9a10"
        );
    }

    #[test]
    fn add_card_body_shape() {
        let body = serde_json::to_value(NewDeckCard {
            card_id: "a1".to_owned(),
            quantity: 1,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({ "card_id": "a1", "quantity": 1 }));
    }
}
