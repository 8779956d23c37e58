//! Render-or-fetch decisions.
//!
//! Deciding never performs I/O: it returns an [`Action`] that the dashboard
//! executes later.

use std::sync::Arc;

use reqwest::Url;

use super::store::Store;
use crate::models::Rover;

/// A screen the dashboard can paint.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Grid of rover cards.
    Rovers(Arc<Store>),
    /// Detail page of one rover.
    Rover(Rover),
    /// Static network error screen.
    Error,
}

/// A proxy query the dashboard needs before it can paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Rovers,
    LatestPhotos { rover: String, earth_date: String },
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn with_segments(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
    Some(url)
}

impl Request {
    /// Full proxy URL of this request under `base`.
    pub fn url(&self, base: &Url) -> Option<Url> {
        match self {
            Request::Rovers => with_segments(base, &["rovers"]),
            Request::LatestPhotos { rover, earth_date } => {
                let mut url = with_segments(base, &["rovers", rover.as_str(), "latestphotos"])?;
                url.query_pairs_mut().append_pair("earth_date", earth_date);
                Some(url)
            }
        }
    }

    /// Path and query on the proxy.
    pub fn path(&self) -> String {
        Url::parse("http://proxy/")
            .ok()
            .and_then(|base| self.url(&base))
            .map(|url| match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            })
            .unwrap_or_default()
    }
}

/// What to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Render(View),
    Fetch(Request),
}

/// Rover list: paint from the store once charged, fetch otherwise.
pub fn try_render_rovers(store: &Arc<Store>) -> Action {
    if store.rovers_charged {
        Action::Render(View::Rovers(store.clone()))
    } else {
        Action::Fetch(Request::Rovers)
    }
}

/// Rover detail: paint once photos are cached, fetch the `max_date` photos otherwise.
pub fn try_render_rover(store: &Store, rover_name: &str) -> Action {
    match store.rover(rover_name) {
        Some(rover) if rover.has_photos() => Action::Render(View::Rover(rover.clone())),
        Some(rover) => Action::Fetch(Request::LatestPhotos {
            rover: rover.name.clone(),
            earth_date: rover.max_date.clone(),
        }),
        None => {
            tracing::warn!(rover = %rover_name, "No such rover in store");
            Action::Render(View::Error)
        }
    }
}
