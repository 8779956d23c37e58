//! The page the dashboard paints into.
//!
//! A [`Page`] owns the root container and the card click listeners. In a
//! browser this is the DOM; [`MemoryPage`] keeps the same state in memory.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Click listener bound to one rover card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardListener {
    /// Card element id, equal to the rover id.
    pub card_id: i64,
    pub rover_name: String,
}

/// DOM surface used by the dashboard.
pub trait Page: Send + Sync {
    /// Replace the whole content of the root container.
    fn paint(&self, markup: String);

    /// Bind one click listener per card.
    fn attach_card_listeners(&self, listeners: Vec<CardListener>);

    /// Remove every card listener.
    fn detach_card_listeners(&self);

    /// Rover name bound to a card, if that card currently has a listener.
    fn listener_for(&self, card_id: i64) -> Option<String>;
}

#[derive(Debug, Default)]
struct PageState {
    root: String,
    listeners: BTreeMap<i64, String>,
    paints: usize,
}

/// In-memory page.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current markup of the root container.
    pub fn root(&self) -> String {
        self.state().root.clone()
    }

    /// Number of cards with a bound listener.
    pub fn listener_count(&self) -> usize {
        self.state().listeners.len()
    }

    /// Number of paints so far.
    pub fn paint_count(&self) -> usize {
        self.state().paints
    }
}

impl Page for MemoryPage {
    fn paint(&self, markup: String) {
        let mut state = self.state();
        state.root = markup;
        state.paints += 1;
    }

    fn attach_card_listeners(&self, listeners: Vec<CardListener>) {
        let mut state = self.state();
        for listener in listeners {
            state.listeners.insert(listener.card_id, listener.rover_name);
        }
    }

    fn detach_card_listeners(&self) {
        self.state().listeners.clear();
    }

    fn listener_for(&self, card_id: i64) -> Option<String> {
        self.state().listeners.get(&card_id).cloned()
    }
}
