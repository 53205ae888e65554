//! Symbol reference handling
//!
//! Inline symbols (`{T}`, `{G/P}`, ...) are opaque references resolved to
//! images by the embedding surface. This module owns the key normalization
//! shared by every lookup site and the startup-populated symbol cache.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static MANA_SYMBOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Normalize a symbol reference into its cache/asset key.
///
/// Keys are lowercase with slashes stripped, so `{G/P}` and `{g/p}` both
/// resolve to `gp`.
pub fn normalize_symbol_key(symbol: &str) -> String {
    symbol.to_lowercase().replace('/', "")
}

/// Split a raw mana-cost string into its symbol contents, in order.
///
/// Text outside brace groups is ignored; a string with no groups yields
/// an empty vec.
pub fn parse_mana_string(mana: &str) -> Vec<String> {
    MANA_SYMBOL_RE
        .captures_iter(mana)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Cache of symbol images, keyed by normalized symbol reference.
///
/// Populated once at startup by the embedder and handed to its surface
/// implementation; the image type is opaque to this crate. A miss is not
/// an error, since unresolved symbols are skipped at draw time.
#[derive(Debug, Default)]
pub struct SymbolCache<I> {
    images: HashMap<String, I>,
}

impl<I> SymbolCache<I> {
    pub fn new() -> Self {
        Self { images: HashMap::new() }
    }

    /// Store an image under its normalized key, replacing any previous entry
    pub fn insert(&mut self, symbol: &str, image: I) {
        self.images.insert(normalize_symbol_key(symbol), image);
    }

    pub fn get(&self, symbol: &str) -> Option<&I> {
        let key = normalize_symbol_key(symbol);
        let found = self.images.get(&key);
        if found.is_none() {
            debug!("no image cached for symbol {key:?}");
        }
        found
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
