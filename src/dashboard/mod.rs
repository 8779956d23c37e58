//! Client engine of the rover dashboard.
//!
//! The engine owns a [`StoreHandle`], asks the decision functions whether a
//! screen can be painted from the current snapshot, fetches from the proxy when
//! it cannot, and paints the result into a [`Page`].
//!
//! Fetch chains are neither de-duplicated nor cancelled. Two clicks on the same
//! card run two independent chains and the one that completes last decides the
//! published photos and the painted view.

mod client;
mod decision;
mod page;
mod render;
mod store;

pub use client::{ClientError, ProxyClient, RoverApi};
pub use decision::{try_render_rover, try_render_rovers, Action, Request, View};
pub use page::{CardListener, MemoryPage, Page};
pub use render::{error_view, html_escape, rover_card, rover_view, rovers_view};
pub use store::{
    reduce, update_rover_photos, update_rovers, RoversUpdate, Store, StoreEvent, StoreHandle,
};

use std::sync::Arc;

use crate::models::{PhotosResponse, RoversResponse};

/// The dashboard: one store, one proxy, one page.
pub struct Dashboard {
    store: StoreHandle,
    api: Arc<dyn RoverApi>,
    page: Arc<dyn Page>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn RoverApi>, page: Arc<dyn Page>) -> Self {
        Self::with_store(StoreHandle::default(), api, page)
    }

    pub fn with_store(store: StoreHandle, api: Arc<dyn RoverApi>, page: Arc<dyn Page>) -> Self {
        Self { store, api, page }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Page is ready: show the rover grid.
    pub async fn start(&self) {
        tracing::info!("Dashboard starting");
        self.show_rovers().await;
    }

    /// The menu entry leads back to the rover grid.
    pub async fn menu_click(&self) {
        self.show_rovers().await;
    }

    /// Click on a rover card. Cards without a bound listener ignore clicks.
    pub async fn card_click(&self, card_id: i64) {
        match self.page.listener_for(card_id) {
            Some(rover_name) => self.show_rover(&rover_name).await,
            None => tracing::debug!(card_id, "Click on card without listener"),
        }
    }

    pub async fn show_rovers(&self) {
        let action = try_render_rovers(&self.store.snapshot());
        self.execute(action).await;
    }

    pub async fn show_rover(&self, rover_name: &str) {
        let action = try_render_rover(&self.store.snapshot(), rover_name);
        self.execute(action).await;
    }

    /// Run an action produced by a decision function.
    pub async fn execute(&self, action: Action) {
        match action {
            Action::Render(view) => self.render(view),
            Action::Fetch(Request::Rovers) => self.fetch_rovers().await,
            Action::Fetch(Request::LatestPhotos { rover, earth_date }) => {
                self.fetch_rover_photos(&rover, &earth_date).await
            }
        }
    }

    /// Fetch the rover list, publish it and paint the grid.
    pub async fn fetch_rovers(&self) {
        let response = match self.api.rovers().await.and_then(accept_rovers) {
            Ok(response) => response,
            Err(e) => return self.fail(&Request::Rovers, e),
        };

        tracing::info!("Loaded {} rovers", response.rovers.len());
        let store = self.store.apply(StoreEvent::RoversLoaded(RoversUpdate {
            rovers_charged: response.success,
            rovers: response.rovers,
        }));

        let fallback = View::Rovers(store.clone());
        self.settle(try_render_rovers(&store), fallback);
    }

    /// Fetch one rover's photos for `earth_date`, publish them and paint the detail page.
    pub async fn fetch_rover_photos(&self, rover_name: &str, earth_date: &str) {
        let request = Request::LatestPhotos {
            rover: rover_name.to_string(),
            earth_date: earth_date.to_string(),
        };
        let response = match self
            .api
            .latest_photos(rover_name, earth_date)
            .await
            .and_then(accept_photos)
        {
            Ok(response) => response,
            Err(e) => return self.fail(&request, e),
        };

        tracing::info!(rover = %rover_name, "Loaded {} photos", response.photos.len());
        let store = self.store.apply(StoreEvent::PhotosLoaded {
            rover_name: rover_name.to_string(),
            photos: response.photos,
        });

        let fallback = store
            .rover(rover_name)
            .map(|rover| View::Rover(rover.clone()))
            .unwrap_or(View::Error);
        self.settle(try_render_rover(&store, rover_name), fallback);
    }

    /// Run the decision taken after a fetch. A chain never fetches twice: if the
    /// fresh snapshot still asks for a fetch, paint `fallback` instead.
    fn settle(&self, action: Action, fallback: View) {
        match action {
            Action::Render(view) => self.render(view),
            Action::Fetch(request) => {
                tracing::warn!(path = %request.path(), "Still incomplete after fetch, painting as is");
                self.render(fallback);
            }
        }
    }

    fn fail(&self, request: &Request, error: ClientError) {
        tracing::warn!(path = %request.path(), "Fetch failed: {}", error);
        self.render(View::Error);
    }

    /// Paint a view. Card listeners exist only while the grid is on screen.
    pub fn render(&self, view: View) {
        self.page.detach_card_listeners();
        match view {
            View::Rovers(store) => {
                self.page.paint(rovers_view(&store));
                let listeners = store
                    .rovers
                    .iter()
                    .map(|rover| CardListener {
                        card_id: rover.id,
                        rover_name: rover.name.clone(),
                    })
                    .collect();
                self.page.attach_card_listeners(listeners);
            }
            View::Rover(rover) => self.page.paint(rover_view(&rover)),
            View::Error => self.page.paint(error_view()),
        }
    }
}

fn accept_rovers(response: RoversResponse) -> Result<RoversResponse, ClientError> {
    if response.success {
        Ok(response)
    } else {
        Err(ClientError::rejected(response.code, response.message))
    }
}

fn accept_photos(response: PhotosResponse) -> Result<PhotosResponse, ClientError> {
    if response.success {
        Ok(response)
    } else {
        Err(ClientError::rejected(response.code, response.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::models::{Photo, Rover, RoverResponse};

    /// Scripted proxy: a fixed rover list and a queue of delayed photo replies.
    #[derive(Default)]
    struct FakeApi {
        rovers: Option<RoversResponse>,
        photo_replies: Mutex<VecDeque<(u64, PhotosResponse)>>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn with_rovers(rovers: Vec<Rover>) -> Self {
            Self {
                rovers: Some(RoversResponse::ok(rovers)),
                ..Self::default()
            }
        }

        fn reply_photos(self, delay_ms: u64, photos: Vec<Photo>) -> Self {
            self.photo_replies
                .lock()
                .unwrap()
                .push_back((delay_ms, PhotosResponse::ok(photos)));
            self
        }

        fn record(&self, path: String) {
            self.requests.lock().unwrap().push(path);
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.requests().iter().filter(|p| p.starts_with(prefix)).count()
        }

        fn list_fetches(&self) -> usize {
            self.requests().iter().filter(|p| *p == "/rovers").count()
        }
    }

    #[async_trait]
    impl RoverApi for FakeApi {
        async fn rovers(&self) -> Result<RoversResponse, ClientError> {
            self.record(Request::Rovers.path());
            self.rovers
                .clone()
                .ok_or_else(|| ClientError::Transport("connection refused".to_string()))
        }

        async fn rover(&self, name: &str) -> Result<RoverResponse, ClientError> {
            self.record(format!("/rovers/{}", name));
            let rover = self
                .rovers
                .as_ref()
                .and_then(|r| r.rovers.iter().find(|rover| rover.name == name).cloned())
                .unwrap_or_default();
            Ok(RoverResponse::ok(rover))
        }

        async fn latest_photos(
            &self,
            name: &str,
            earth_date: &str,
        ) -> Result<PhotosResponse, ClientError> {
            self.record(
                Request::LatestPhotos {
                    rover: name.to_string(),
                    earth_date: earth_date.to_string(),
                }
                .path(),
            );
            let next = self.photo_replies.lock().unwrap().pop_front();
            match next {
                Some((delay_ms, reply)) => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Ok(reply)
                }
                None => Err(ClientError::Transport("connection reset".to_string())),
            }
        }
    }

    fn rover(id: i64, name: &str) -> Rover {
        Rover {
            id,
            name: name.to_string(),
            status: "active".to_string(),
            max_date: "2021-01-01".to_string(),
            ..Rover::default()
        }
    }

    fn photos(prefix: &str, n: usize) -> Vec<Photo> {
        (0..n)
            .map(|i| Photo {
                img_src: format!("http://mars/{}-{}.jpg", prefix, i),
                sol: 3000,
                earth_date: "2021-01-01".to_string(),
                camera: 20,
            })
            .collect()
    }

    fn fleet() -> Vec<Rover> {
        vec![rover(5, "Curiosity"), rover(7, "Spirit"), rover(6, "Opportunity")]
    }

    fn dashboard(api: FakeApi) -> (Dashboard, Arc<FakeApi>, Arc<MemoryPage>) {
        let api = Arc::new(api);
        let page = Arc::new(MemoryPage::new());
        (Dashboard::new(api.clone(), page.clone()), api, page)
    }

    fn gallery_size(page: &MemoryPage) -> usize {
        page.root().matches(r#"class="rover-photo""#).count()
    }

    #[tokio::test]
    async fn test_start_fetches_and_renders_grid() {
        let (dash, api, page) = dashboard(FakeApi::with_rovers(fleet()));

        dash.start().await;

        let store = dash.store().snapshot();
        assert!(store.rovers_charged);
        let names: Vec<_> = store.rovers.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Curiosity", "Spirit", "Opportunity"]);
        assert_eq!(page.root().matches("card-container").count(), 3);
        assert_eq!(page.listener_count(), 3);
        assert_eq!(api.requests(), ["/rovers"]);
    }

    #[tokio::test]
    async fn test_grid_is_served_from_cache_after_first_fetch() {
        let (dash, api, page) = dashboard(FakeApi::with_rovers(fleet()));

        dash.start().await;
        dash.menu_click().await;
        dash.menu_click().await;

        assert_eq!(api.list_fetches(), 1);
        assert_eq!(page.paint_count(), 3);
        assert_eq!(page.listener_count(), 3);
    }

    #[tokio::test]
    async fn test_decision_has_no_side_effects() {
        let (dash, api, page) = dashboard(FakeApi::with_rovers(fleet()));

        let store = dash.store().snapshot();
        assert_eq!(try_render_rovers(&store), try_render_rovers(&store));
        assert!(api.requests().is_empty());
        assert_eq!(page.paint_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_rover_list_renders_no_cards() {
        let (dash, _api, page) = dashboard(FakeApi::with_rovers(Vec::new()));

        dash.start().await;

        assert!(dash.store().snapshot().rovers_charged);
        assert!(page.root().contains("rovers-section-layout"));
        assert_eq!(page.root().matches("card-container").count(), 0);
        assert!(!page.root().contains("Network Error"));
    }

    #[tokio::test]
    async fn test_list_failure_renders_error_and_keeps_store() {
        let (dash, _api, page) = dashboard(FakeApi::default());

        dash.start().await;

        assert!(page.root().contains("Network Error"));
        assert_eq!(*dash.store().snapshot(), Store::default());
        assert_eq!(page.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_a_failure() {
        let api = FakeApi {
            rovers: Some(RoversResponse {
                success: false,
                code: Some(500),
                message: Some("Internal Server Error".to_string()),
                ..RoversResponse::default()
            }),
            ..FakeApi::default()
        };
        let (dash, api, page) = dashboard(api);

        dash.start().await;

        assert!(page.root().contains("Network Error"));
        assert!(!dash.store().snapshot().rovers_charged);
        assert_eq!(api.list_fetches(), 1);
    }

    #[tokio::test]
    async fn test_card_click_fetches_latest_photos() {
        let (dash, api, page) =
            dashboard(FakeApi::with_rovers(fleet()).reply_photos(0, photos("a", 2)));

        dash.start().await;
        dash.card_click(5).await;

        assert!(api
            .requests()
            .contains(&"/rovers/Curiosity/latestphotos?earth_date=2021-01-01".to_string()));
        assert_eq!(gallery_size(&page), 2);
        assert!(page.root().contains("Name: </b>Curiosity"));
        assert_eq!(dash.store().snapshot().rover("Curiosity").unwrap().photos.len(), 2);
    }

    #[tokio::test]
    async fn test_detail_never_fetches_twice() {
        let (dash, api, page) =
            dashboard(FakeApi::with_rovers(fleet()).reply_photos(0, photos("a", 2)));

        dash.start().await;
        dash.card_click(5).await;
        dash.menu_click().await;
        dash.card_click(5).await;

        assert_eq!(api.count("/rovers/Curiosity/latestphotos"), 1);
        assert_eq!(api.list_fetches(), 1);
        assert_eq!(gallery_size(&page), 2);
    }

    #[tokio::test]
    async fn test_listeners_follow_the_grid() {
        let (dash, _api, page) =
            dashboard(FakeApi::with_rovers(fleet()).reply_photos(0, photos("a", 1)));

        dash.start().await;
        assert_eq!(page.listener_count(), 3);

        dash.card_click(5).await;
        assert_eq!(page.listener_count(), 0);

        // Cards are gone from the detail page, so clicks go nowhere.
        let paints = page.paint_count();
        dash.card_click(7).await;
        assert_eq!(page.paint_count(), paints);

        dash.menu_click().await;
        assert_eq!(page.listener_count(), 3);
        assert_eq!(page.listener_for(7).as_deref(), Some("Spirit"));
    }

    #[tokio::test]
    async fn test_photo_failure_renders_error() {
        let (dash, _api, page) = dashboard(FakeApi::with_rovers(fleet()));

        dash.start().await;
        dash.card_click(7).await;

        assert!(page.root().contains("Network Error"));
        assert!(dash.store().snapshot().rover("Spirit").unwrap().photos.is_empty());
        assert!(dash.store().snapshot().rovers_charged);
    }

    #[tokio::test]
    async fn test_empty_photo_reply_paints_without_refetching() {
        let (dash, api, page) =
            dashboard(FakeApi::with_rovers(fleet()).reply_photos(0, Vec::new()));

        dash.start().await;
        dash.card_click(6).await;

        assert_eq!(api.count("/rovers/Opportunity/latestphotos"), 1);
        assert!(page.root().contains("Name: </b>Opportunity"));
        assert_eq!(gallery_size(&page), 0);
    }

    #[tokio::test]
    async fn test_unknown_rover_renders_error() {
        let (dash, api, page) = dashboard(FakeApi::with_rovers(fleet()));

        dash.start().await;
        dash.show_rover("Sojourner").await;

        assert!(page.root().contains("Network Error"));
        assert_eq!(api.count("/rovers/Sojourner"), 0);
    }

    #[tokio::test]
    async fn test_double_click_last_response_wins() {
        // First reply is slow, second is fast: the first chain completes last.
        let api = FakeApi::with_rovers(fleet())
            .reply_photos(80, photos("slow", 2))
            .reply_photos(10, photos("fast", 3));
        let (dash, api, page) = dashboard(api);

        dash.start().await;
        tokio::join!(dash.card_click(5), dash.card_click(5));

        assert_eq!(api.count("/rovers/Curiosity/latestphotos"), 2);
        let store = dash.store().snapshot();
        let curiosity = store.rover("Curiosity").unwrap();
        assert_eq!(curiosity.photos, photos("slow", 2));
        assert_eq!(gallery_size(&page), 2);
        assert!(page.root().contains("slow-0.jpg"));
    }
}
