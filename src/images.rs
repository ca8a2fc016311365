use std::collections::{HashMap, HashSet};

use bytes::Bytes;

/// Downloaded card art keyed by URL.
#[derive(Debug, Default)]
pub struct ImageCache {
    loaded: HashMap<String, Bytes>,
    requested: HashSet<String>,
}

impl ImageCache {
    /// Returns `true` the first time a URL is asked for.
    pub fn request(&mut self, url: &str) -> bool {
        !self.loaded.contains_key(url) && self.requested.insert(url.to_owned())
    }

    pub fn insert(&mut self, url: String, bytes: Option<Bytes>) {
        if let Some(b) = bytes {
            self.loaded.insert(url, b);
        }
    }

    pub fn get(&self, url: &str) -> Option<&Bytes> {
        self.loaded.get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_requested_once() {
        let mut cache = ImageCache::default();

        assert!(cache.request("forest.jpg"));
        assert!(!cache.request("forest.jpg"));
    }

    #[test]
    fn failed_download_is_not_retried() {
        let mut cache = ImageCache::default();
        cache.request("island.jpg");

        cache.insert("island.jpg".to_owned(), None);

        assert!(cache.get("island.jpg").is_none());
        assert!(!cache.request("island.jpg"));
    }

    #[test]
    fn loaded_bytes_are_served() {
        let mut cache = ImageCache::default();
        cache.request("swamp.jpg");

        cache.insert("swamp.jpg".to_owned(), Some(Bytes::from_static(b"jpeg")));

        assert_eq!(cache.get("swamp.jpg").map(|b| &b[..]), Some(&b"jpeg"[..]));
    }
}
