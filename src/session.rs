//! Page-session state around a [`VisitedSet`].
//!
//! A viewing session starts from either a share link (the `stamp` query
//! parameter) or the visitor's own saved progress in a local key-value store.
//! [`Session`] owns the single set for that session and decides where it came
//! from, what the share link looks like, and when saving needs confirmation.
//! The map, popups and dialogs stay with the host; they only call into this
//! module.

use std::{collections::HashMap, convert::Infallible};

use crate::{DEFAULT_CAPACITY, VisitedSet};

/// Host settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Number of items in the catalogue
    pub capacity: usize,
    /// Key under which the token is kept in the local store
    pub storage_key: String,
    /// Name of the query parameter carrying a shared token
    pub query_param: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            storage_key: "hannou100".into(),
            query_param: "stamp".into(),
        }
    }
}

/// A key-value store that survives page reloads.
pub trait Store {
    /// Error returned when a write is refused.
    type Error;

    /// Returns the value stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// An in-memory [`Store`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the value under `key`, as a visitor clearing site data would.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Where the session's set was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The visitor's own progress, read from the local store
    Local,
    /// Someone else's progress, read from a share link
    Shared,
}

/// Result of [`Session::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SaveOutcome {
    /// The token was written to the store
    Saved,
    /// The session shows a shared link; saving would overwrite the visitor's
    /// own progress, so nothing was written. Call
    /// [`Session::confirm_save`] once the visitor agrees.
    NeedsConfirmation,
}

/// The visited set of one viewing session and its share-link context.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    base_url: String,
    origin: Origin,
    visited: VisitedSet,
}

impl Session {
    /// Opens a session for the page at `page_url`.
    ///
    /// If the URL carries the configured query parameter and it decodes to a
    /// non-empty set, the session shows that shared set. Otherwise the token
    /// saved in `store` is used. A corrupted token from either source yields
    /// an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use summit_stamp::session::{MemoryStore, Origin, Session, SessionConfig};
    ///
    /// let store = MemoryStore::new();
    /// let session = Session::open(
    ///     SessionConfig::default(),
    ///     "https://example.org/hannou/?stamp=7",
    ///     &store,
    /// );
    /// assert_eq!(session.origin(), Origin::Shared);
    /// assert_eq!(session.visited_label(), "3/112");
    /// assert_eq!(session.back_to_local_link(), Some("https://example.org/hannou/"));
    /// ```
    pub fn open<S: Store>(config: SessionConfig, page_url: &str, store: &S) -> Self {
        let (base_url, query) = split_url(page_url);

        if let Some(token) = query_value(query, &config.query_param) {
            let visited = VisitedSet::parse(Some(token), config.capacity);
            if !visited.is_empty() {
                tracing::info!(count = visited.count(), "opened shared visited set");
                return Self {
                    base_url: base_url.to_owned(),
                    origin: Origin::Shared,
                    visited,
                    config,
                };
            }
            tracing::debug!("shared link carries no visited ids, using local store");
        }

        let stored = store.load(&config.storage_key);
        let visited = VisitedSet::parse(stored.as_deref(), config.capacity);
        tracing::info!(count = visited.count(), "opened local visited set");
        Self {
            base_url: base_url.to_owned(),
            origin: Origin::Local,
            visited,
            config,
        }
    }

    /// Returns where the current set was loaded from.
    #[must_use]
    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns the session's set.
    #[must_use]
    pub const fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Returns the session settings.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Marks or unmarks `id`, as the per-summit checkbox does.
    ///
    /// Returns `true` if the set changed. The share link and label reflect
    /// the change on their next call.
    pub fn toggle(&mut self, id: usize, on: bool) -> bool {
        let changed = self.visited.set(id, on);
        if changed {
            tracing::debug!(id, on, "visited mark changed");
        }
        changed
    }

    /// Builds the link that reproduces this session's set on another device.
    ///
    /// ```
    /// # use summit_stamp::session::{MemoryStore, Session, SessionConfig};
    /// let mut session = Session::open(
    ///     SessionConfig::default(),
    ///     "https://example.org/",
    ///     &MemoryStore::new(),
    /// );
    /// session.toggle(1, true);
    /// assert_eq!(session.share_link(), "https://example.org/?stamp=1");
    /// ```
    #[must_use]
    pub fn share_link(&self) -> String {
        format!(
            "{}?{}={}",
            self.base_url,
            self.config.query_param,
            self.visited.serialize()
        )
    }

    /// Formats the visited counter, e.g. `"3/112"`.
    #[must_use]
    pub fn visited_label(&self) -> String {
        self.visited.visited_label()
    }

    /// Returns the page URL without the share parameter, when the session
    /// shows a shared link.
    #[must_use]
    pub fn back_to_local_link(&self) -> Option<&str> {
        match self.origin {
            Origin::Shared => Some(&self.base_url),
            Origin::Local => None,
        }
    }

    /// Saves the set to `store` unless the session shows a shared link.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write is refused.
    pub fn save<S: Store>(&self, store: &mut S) -> Result<SaveOutcome, S::Error> {
        match self.origin {
            Origin::Shared => {
                tracing::debug!("save of shared set needs confirmation");
                Ok(SaveOutcome::NeedsConfirmation)
            }
            Origin::Local => {
                self.write(store)?;
                Ok(SaveOutcome::Saved)
            }
        }
    }

    /// Saves the set to `store` unconditionally and continues as a local
    /// session.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write is refused. The session stays
    /// shared in that case.
    pub fn confirm_save<S: Store>(&mut self, store: &mut S) -> Result<(), S::Error> {
        self.write(store)?;
        self.origin = Origin::Local;
        Ok(())
    }

    fn write<S: Store>(&self, store: &mut S) -> Result<(), S::Error> {
        let token = self.visited.serialize();
        store.save(&self.config.storage_key, &token)?;
        tracing::info!(
            key = %self.config.storage_key,
            count = self.visited.count(),
            "saved visited set"
        );
        Ok(())
    }
}

/// Splits a URL into the part before its query or fragment, and its query.
fn split_url(url: &str) -> (&str, &str) {
    let (url, _fragment) = url.split_once('#').unwrap_or((url, ""));
    url.split_once('?').unwrap_or((url, ""))
}

/// Returns the first non-empty value of `name` in a query string.
///
/// Values are not percent-decoded: a token never needs escaping, so an
/// escaped value is treated like any other corrupted token.
fn query_value<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
