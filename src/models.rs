use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Deck {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewDeck {
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeckCard {
    pub id: i64,
    pub deck_id: Uuid,
    pub card_id: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewDeckCard {
    pub card_id: String,
    pub quantity: i32,
}

/// Server-computed rating; the score arrives as text and is shown verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SynergyScore {
    pub id: i64,
    pub deck_id: Uuid,
    pub synergy_score: String,
    pub calculated_at: String,
}

/// A card as described by the external catalog. Only the fields the client
/// renders are kept; everything else in the catalog payload is ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ImageUris {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
}

impl CatalogCard {
    pub fn image(&self) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(|imgs| {
                imgs.normal
                    .as_deref()
                    .or(imgs.png.as_deref())
                    .or(imgs.small.as_deref())
            })
    }

    /// What the deck canvas keeps once the card has been added.
    pub fn visual(&self) -> Visual {
        match self.image() {
            Some(url) => Visual::Image(url.to_owned()),
            None => Visual::Label(self.name.clone()),
        }
    }
}

/// One page of catalog results plus its continuation state.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CatalogPage {
    pub data: Vec<CatalogCard>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A saved deck entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCard {
    pub entry: DeckCard,
    pub card: CatalogCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Visual {
    Image(String),
    Label(String),
}
