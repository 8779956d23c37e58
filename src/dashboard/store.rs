//! Immutable rover store and its transitions.
//!
//! A [`Store`] is never mutated once published. Transitions are pure functions
//! from one snapshot to the next; [`StoreHandle`] is the single writer that
//! publishes each new snapshot.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{Photo, Rover};

/// Everything the client knows about the rovers at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    /// True once the rover list has been fetched.
    pub rovers_charged: bool,
    pub loading_error: bool,
    /// Upstream order.
    pub rovers: Vec<Rover>,
}

/// Payload of the rover list transition.
#[derive(Debug, Clone, PartialEq)]
pub struct RoversUpdate {
    pub rovers_charged: bool,
    pub rovers: Vec<Rover>,
}

/// Inputs to [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    RoversLoaded(RoversUpdate),
    PhotosLoaded { rover_name: String, photos: Vec<Photo> },
}

impl Store {
    /// First rover with this name.
    pub fn rover(&self, name: &str) -> Option<&Rover> {
        self.rovers.iter().find(|rover| rover.name == name)
    }

    /// Position of the first rover with this name.
    pub fn rover_index(&self, name: &str) -> Option<usize> {
        self.rovers.iter().position(|rover| rover.name == name)
    }
}

/// Replace the charged flag and the rover list.
pub fn update_rovers(state: &Store, update: RoversUpdate) -> Store {
    Store {
        rovers_charged: update.rovers_charged,
        rovers: update.rovers,
        ..state.clone()
    }
}

/// Set the photos of the named rover. Unknown names leave the store as it was.
pub fn update_rover_photos(state: &Store, rover_name: &str, photos: Vec<Photo>) -> Store {
    let mut next = state.clone();
    match next.rover_index(rover_name) {
        Some(index) => next.rovers[index].photos = photos,
        None => tracing::warn!(rover = %rover_name, "Photos received for unknown rover, ignoring"),
    }
    next
}

/// Apply one event to a snapshot.
pub fn reduce(state: &Store, event: StoreEvent) -> Store {
    match event {
        StoreEvent::RoversLoaded(update) => update_rovers(state, update),
        StoreEvent::PhotosLoaded { rover_name, photos } => {
            update_rover_photos(state, &rover_name, photos)
        }
    }
}

/// Single-writer container publishing store snapshots.
///
/// Cloning the handle shares the same container.
#[derive(Clone)]
pub struct StoreHandle {
    tx: Arc<watch::Sender<Arc<Store>>>,
}

impl StoreHandle {
    pub fn new(initial: Store) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx: Arc::new(tx) }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Store> {
        self.tx.borrow().clone()
    }

    /// Reduce the current snapshot with `event`, publish and return the result.
    pub fn apply(&self, event: StoreEvent) -> Arc<Store> {
        let mut published = None;
        self.tx.send_modify(|current| {
            let next = Arc::new(reduce(&**current, event));
            *current = next.clone();
            published = Some(next);
        });
        published.unwrap_or_else(|| self.snapshot())
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Store>> {
        self.tx.subscribe()
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(Store::default())
    }
}
