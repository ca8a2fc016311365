use std::collections::HashSet;

use crate::{
    error::Fetched,
    models::{CatalogCard, CatalogPage},
};

/// Identifies one issued catalog request. Only the most recently issued
/// ticket is ever accepted back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// The default unfiltered query.
    FirstPage,
    NextPage(String),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub ticket: Ticket,
    pub query: CatalogQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub cursor: Option<String>,
    pub has_more: bool,
    pub first_page_requested: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            cursor: None,
            has_more: true,
            first_page_requested: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Merge {
    Append,
    Replace,
}

#[derive(Debug, Clone, Copy)]
struct Outstanding {
    ticket: Ticket,
    merge: Merge,
}

/// Paginated, searchable view over the catalog.
///
/// The browser never talks to the network itself: triggers hand back a
/// [`CatalogRequest`] to run, and the response is fed back through
/// [`CardBrowser::apply`] with the ticket it was issued under.
#[derive(Debug, Default)]
pub struct CardBrowser {
    cards: Vec<CatalogCard>,
    pagination: Pagination,
    search_term: String,
    outstanding: Option<Outstanding>,
    issued: u64,
}

impl CardBrowser {
    pub fn cards(&self) -> &[CatalogCard] {
        &self.cards
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn can_load_more(&self) -> bool {
        self.pagination.has_more && self.pagination.cursor.is_some()
    }

    /// Cards whose name contains the active search term, ignoring case.
    pub fn visible(&self) -> Vec<&CatalogCard> {
        filter_by_name(&self.cards, &self.search_term)
    }

    /// Initial mount: fetch the unfiltered first page once.
    pub fn start(&mut self) -> Option<CatalogRequest> {
        if !self.search_term.is_empty()
            || self.pagination.cursor.is_some()
            || self.pagination.first_page_requested
        {
            return None;
        }

        self.pagination.first_page_requested = true;
        Some(self.issue(CatalogQuery::FirstPage, Merge::Append))
    }

    pub fn scroll_to_bottom(&mut self) -> Option<CatalogRequest> {
        if self.outstanding.is_some() || !self.pagination.has_more {
            return None;
        }

        let cursor = self.pagination.cursor.clone()?;
        Some(self.issue(CatalogQuery::NextPage(cursor), Merge::Append))
    }

    pub fn set_search_term(&mut self, term: String) -> Option<CatalogRequest> {
        self.search_term = term;

        if self.search_term.is_empty() {
            self.clear_search();
            return self.start();
        }

        None
    }

    pub fn submit_search(&mut self) -> Option<CatalogRequest> {
        let term = self.search_term.trim().to_owned();
        if term.is_empty() {
            self.clear_search();
            return self.start();
        }

        self.cards.clear();
        Some(self.issue(CatalogQuery::Search(term), Merge::Replace))
    }

    /// Back to the pre-mount state. Any outstanding response becomes stale.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.cards.clear();
        self.pagination = Pagination::default();
        self.outstanding = None;
    }

    /// Feed a response back in. Returns the cards that just became part of
    /// the list, or `None` when the response was stale or failed.
    pub fn apply(&mut self, ticket: Ticket, result: Fetched<CatalogPage>) -> Option<&[CatalogCard]> {
        let outstanding = match self.outstanding {
            Some(outstanding) if outstanding.ticket == ticket => outstanding,
            _ => {
                tracing::debug!(?ticket, "dropping superseded catalog response");
                return None;
            }
        };
        self.outstanding = None;

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(error = %err, "fetching cards failed");
                return None;
            }
        };

        match outstanding.merge {
            Merge::Append => {
                let start = self.cards.len();
                self.cards.extend(page.data);
                self.pagination.cursor = page.next_page;
                self.pagination.has_more = page.has_more;
                Some(&self.cards[start..])
            }
            Merge::Replace => {
                let previous = std::mem::take(&mut self.cards);
                self.cards = merge_by_identity(previous, page.data);
                self.pagination.cursor = None;
                self.pagination.has_more = false;
                Some(self.cards.as_slice())
            }
        }
    }

    fn issue(&mut self, query: CatalogQuery, merge: Merge) -> CatalogRequest {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        if let Some(previous) = self.outstanding.replace(Outstanding { ticket, merge }) {
            tracing::debug!(superseded = ?previous.ticket, ?ticket, "superseding catalog request");
        }

        CatalogRequest { ticket, query }
    }
}

pub fn filter_by_name<'a>(cards: &'a [CatalogCard], term: &str) -> Vec<&'a CatalogCard> {
    let needle = term.trim().to_lowercase();
    cards
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Keep the previous cards that also came back in `incoming`, then the rest
/// of `incoming`, with no id listed twice.
fn merge_by_identity(previous: Vec<CatalogCard>, incoming: Vec<CatalogCard>) -> Vec<CatalogCard> {
    let incoming_ids: HashSet<String> = incoming.iter().map(|c| c.id.clone()).collect();
    let mut seen = HashSet::new();

    previous
        .into_iter()
        .filter(|c| incoming_ids.contains(&c.id))
        .chain(incoming)
        .filter(|c| seen.insert(c.id.clone()))
        .collect()
}
