use iced::{
    widget::{self, column, image::Handle, row},
    ContentFit, Element, Length,
};
use uuid::Uuid;

use crate::{
    app::Section,
    browser::{CardBrowser, CatalogRequest, Ticket},
    canvas::DeckCanvas,
    error::Fetched,
    images::ImageCache,
    models::{CatalogCard, CatalogPage, DeckCard, SavedCard, Visual},
    session::Session,
    task::Task,
};

use super::Effect;

/// Relative scroll offset past which the browser counts as scrolled to the bottom.
const BOTTOM_THRESHOLD: f32 = 0.98;
const CANVAS_COLUMNS: usize = 4;

#[derive(Debug, Clone)]
pub enum Message {
    SearchChanged(String),
    SearchSubmitted,
    Scrolled(f32),
    LoadMore,
    CardsFetched(Ticket, Fetched<CatalogPage>),
    AddCard(CatalogCard),
    CardAdded(Visual, Fetched<DeckCard>),
    RemoveFromCanvas(usize),
    SavedLoaded(Fetched<Vec<SavedCard>>),
    Back,
}

#[derive(Debug)]
pub struct Builder {
    deck_id: Uuid,
    browser: CardBrowser,
    canvas: DeckCanvas,
    saved: Vec<SavedCard>,
    saved_loading: bool,
    pending_adds: usize,
}

fn fetch(request: Option<CatalogRequest>) -> Vec<Effect> {
    request
        .map(|r| Effect::Run(Task::FetchCards(r)))
        .into_iter()
        .collect()
}

fn download<'a>(cards: impl IntoIterator<Item = &'a CatalogCard>) -> Vec<Effect> {
    cards
        .into_iter()
        .filter_map(|c| c.image())
        .map(|url| Effect::Run(Task::DownloadImage(url.to_owned())))
        .collect()
}

impl Builder {
    /// `None` when nobody is signed in.
    pub fn open(session: &Session, deck_id: Uuid) -> Option<(Self, Vec<Effect>)> {
        session.user()?;

        let mut builder = Self {
            deck_id,
            browser: CardBrowser::default(),
            canvas: DeckCanvas::default(),
            saved: Vec::new(),
            saved_loading: true,
            pending_adds: 0,
        };

        let mut effects = vec![Effect::Run(Task::LoadSavedCards { deck_id })];
        effects.extend(fetch(builder.browser.start()));

        Some((builder, effects))
    }

    pub fn browser(&self) -> &CardBrowser {
        &self.browser
    }

    pub fn canvas(&self) -> &DeckCanvas {
        &self.canvas
    }

    pub fn saved(&self) -> &[SavedCard] {
        &self.saved
    }

    pub fn is_loading(&self) -> bool {
        self.browser.is_loading() || self.saved_loading || self.pending_adds > 0
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::SearchChanged(term) => return fetch(self.browser.set_search_term(term)),
            Message::SearchSubmitted => return fetch(self.browser.submit_search()),
            Message::Scrolled(offset) if offset >= BOTTOM_THRESHOLD => {
                return fetch(self.browser.scroll_to_bottom())
            }
            Message::Scrolled(_) => {}
            Message::LoadMore => return fetch(self.browser.scroll_to_bottom()),
            Message::CardsFetched(ticket, result) => {
                return self.browser.apply(ticket, result).map(download).unwrap_or_default()
            }
            Message::AddCard(card) => {
                self.pending_adds += 1;
                return vec![Effect::Run(Task::AddCard {
                    deck_id: self.deck_id,
                    card_id: card.id.clone(),
                    visual: card.visual(),
                })];
            }
            Message::CardAdded(visual, result) => {
                self.pending_adds = self.pending_adds.saturating_sub(1);
                match result {
                    Ok(entry) => {
                        tracing::info!(deck_id = %self.deck_id, card_id = %entry.card_id, "card added to deck");
                        self.canvas.push(visual);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, deck_id = %self.deck_id, "adding card to deck failed")
                    }
                }
            }
            Message::RemoveFromCanvas(index) => {
                self.canvas.remove(index);
            }
            Message::SavedLoaded(result) => {
                self.saved_loading = false;
                match result {
                    Ok(saved) => {
                        self.saved = saved;
                        return download(self.saved.iter().map(|s| &s.card));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, deck_id = %self.deck_id, "fetching deck cards failed")
                    }
                }
            }
            Message::Back => return vec![Effect::Navigate(Section::Decks)],
        }

        Vec::new()
    }

    pub fn view<'a>(&'a self, images: &'a ImageCache) -> Element<'a, Message> {
        let search_box = widget::text_input("Search", self.browser().search_term())
            .on_input(Message::SearchChanged)
            .on_submit(Message::SearchSubmitted);
        let btn_search = widget::button("Search").on_press(Message::SearchSubmitted);
        let btn_back = widget::button("Back").on_press(Message::Back);

        let visible = self.browser.visible();
        let nothing_found = visible.is_empty() && !self.browser.is_loading();
        let mut results = widget::column(
            visible
                .into_iter()
                .map(|card| view_card_result(card, images)),
        )
        .spacing(10)
        .width(Length::Fill);

        if nothing_found {
            results = results.push(widget::text("No cards found"));
        }
        if self.is_loading() {
            results = results.push(widget::text("Loading..."));
        } else if self.browser.can_load_more() {
            results = results.push(widget::button("More").on_press(Message::LoadMore));
        }

        let card_results = widget::scrollable(results)
            .on_scroll(|viewport| Message::Scrolled(viewport.relative_offset().y))
            .height(Length::Fill);

        let col_browser = column!(row!(btn_back, search_box, btn_search).spacing(10), card_results)
            .spacing(10)
            .width(Length::FillPortion(3));

        let col_canvas = column!(self.view_saved(), self.view_canvas(images))
            .spacing(20)
            .width(Length::FillPortion(7));

        row!(col_browser, col_canvas).spacing(20).padding(20).into()
    }

    fn view_saved(&self) -> Element<'_, Message> {
        let title = widget::text(format!("In deck ({})", self.saved.len())).size(20);

        let entries = widget::column(self.saved().iter().map(view_saved_card));

        column!(title, entries).spacing(5).into()
    }

    fn view_canvas<'a>(&'a self, images: &'a ImageCache) -> Element<'a, Message> {
        let title = widget::text(format!("Canvas ({} cards)", self.canvas.len())).size(20);

        let rows = self
            .canvas
            .entries()
            .chunks(CANVAS_COLUMNS)
            .enumerate()
            .map(|(row_idx, chunk)| -> Element<'a, Message> {
                widget::row(chunk.iter().enumerate().map(|(col_idx, visual)| {
                    view_canvas_entry(row_idx * CANVAS_COLUMNS + col_idx, visual, images)
                }))
                .spacing(10)
                .into()
            });

        let grid: Element<'a, Message> = if self.canvas.is_empty() {
            widget::text("Click a card to add it to the deck").into()
        } else {
            widget::scrollable(widget::column(rows).spacing(10))
                .height(Length::Fill)
                .into()
        };

        column!(title, grid).spacing(10).into()
    }
}

fn view_card_result<'a>(card: &'a CatalogCard, images: &'a ImageCache) -> Element<'a, Message> {
    widget::button(view_visual(&card.visual(), images))
        .on_press(Message::AddCard(card.clone()))
        .into()
}

fn view_saved_card(saved: &SavedCard) -> Element<'_, Message> {
    widget::text(format!("{}x {}", saved.entry.quantity, saved.card.name)).into()
}

fn view_canvas_entry<'a>(index: usize, visual: &Visual, images: &'a ImageCache) -> Element<'a, Message> {
    widget::button(view_visual(visual, images))
        .on_press(Message::RemoveFromCanvas(index))
        .into()
}

fn view_visual<'a>(visual: &Visual, images: &'a ImageCache) -> Element<'a, Message> {
    match visual {
        Visual::Image(url) => match images.get(url) {
            Some(img_bytes) => widget::image::<Handle>(Handle::from_memory(img_bytes.clone()))
                .content_fit(ContentFit::ScaleDown)
                .height(200)
                .into(),
            None => widget::text(url).into(),
        },
        Visual::Label(name) => widget::text(name).into(),
    }
}
