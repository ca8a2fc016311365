use crate::models::Visual;

/// The unsaved arrangement of cards picked during this editing session.
///
/// Only the visual is kept; removing an entry never reaches the server.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeckCanvas {
    entries: Vec<Visual>,
}

impl DeckCanvas {
    pub fn push(&mut self, visual: Visual) {
        self.entries.push(visual);
    }

    pub fn remove(&mut self, index: usize) -> Option<Visual> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn entries(&self) -> &[Visual] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
