use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{CreateFoodInput, FoodId, FoodItem},
    error::ApiError,
    protocol::{food_route, foods_route, CreateFoodRequest},
};
use tokio::sync::broadcast;
use tracing::{info, warn};
use url::Url;

pub mod error;
pub mod state;

pub use error::CatalogError;
pub use state::{DashboardState, StateChange};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const LOAD_RETRY_ATTEMPTS: usize = 3;
const LOAD_RETRY_DELAY: Duration = Duration::from_millis(250);
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The remote collection resource. The production implementation speaks
/// HTTP; tests substitute in-memory doubles.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_foods(&self) -> Result<Vec<FoodItem>, CatalogError>;
    async fn create_food(&self, request: &CreateFoodRequest) -> Result<FoodItem, CatalogError>;
    async fn update_food(&self, id: FoodId, food: &FoodItem) -> Result<FoodItem, CatalogError>;
    async fn delete_food(&self, id: FoodId) -> Result<(), CatalogError>;
}

pub struct HttpCatalogApi {
    http: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let parsed =
            Url::parse(base_url).map_err(|_| CatalogError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_foods(&self) -> Result<Vec<FoodItem>, CatalogError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, foods_route()))
            .send()
            .await?;
        Ok(into_api_result(response).await?.json().await?)
    }

    async fn create_food(&self, request: &CreateFoodRequest) -> Result<FoodItem, CatalogError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, foods_route()))
            .json(request)
            .send()
            .await?;
        Ok(into_api_result(response).await?.json().await?)
    }

    async fn update_food(&self, id: FoodId, food: &FoodItem) -> Result<FoodItem, CatalogError> {
        let response = self
            .http
            .put(format!("{}{}", self.base_url, food_route(id)))
            .json(food)
            .send()
            .await?;
        Ok(into_api_result(response).await?.json().await?)
    }

    async fn delete_food(&self, id: FoodId) -> Result<(), CatalogError> {
        let response = self
            .http
            .delete(format!("{}{}", self.base_url, food_route(id)))
            .send()
            .await?;
        into_api_result(response).await?;
        Ok(())
    }
}

/// Maps non-2xx responses to [`CatalogError::Api`], surfacing the service's
/// own error message when the body carries one.
async fn into_api_result(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown failure")
            .to_string(),
    };
    Err(CatalogError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Feedback published to UI collaborators after each confirmed mutation or
/// failure, so capture surfaces and list renderers never have to poll.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    CollectionLoaded { count: usize },
    FoodCreated(FoodItem),
    FoodUpdated(FoodItem),
    FoodDeleted(FoodId),
    Error(String),
}

/// Synchronizes the in-memory [`DashboardState`] with the remote collection
/// resource and exposes the CRUD entry points the presentational layer
/// calls into. Mutating operations take `&mut self`: the collection is only
/// ever touched from one task at a time, and only after the server has
/// confirmed the corresponding write.
pub struct DashboardController {
    api: Arc<dyn CatalogApi>,
    pub state: DashboardState,
    events: broadcast::Sender<ControllerEvent>,
}

impl DashboardController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            state: DashboardState::default(),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// One read of the full collection, replacing the local mirror
    /// wholesale. Transient failures are retried a bounded number of times
    /// before the last error is surfaced.
    pub async fn load(&mut self) -> Result<(), CatalogError> {
        let mut attempt = 0;
        let foods = loop {
            match self.api.list_foods().await {
                Ok(foods) => break foods,
                Err(err) if err.is_transient() && attempt + 1 < LOAD_RETRY_ATTEMPTS => {
                    attempt += 1;
                    warn!(attempt, "catalog load hit transient failure: {err}");
                    tokio::time::sleep(LOAD_RETRY_DELAY).await;
                }
                Err(err) => return Err(self.publish_failure("load", err)),
            }
        };

        info!(count = foods.len(), "catalog loaded");
        let count = foods.len();
        state::apply(&mut self.state, StateChange::CollectionLoaded(foods));
        let _ = self.events.send(ControllerEvent::CollectionLoaded { count });
        Ok(())
    }

    /// Sends the input with `available: true`; the server's canonical
    /// record (carrying the assigned id) is appended to the local
    /// collection. On failure local state is unchanged.
    pub async fn create(&mut self, input: CreateFoodInput) -> Result<FoodItem, CatalogError> {
        let request = CreateFoodRequest::new(input);
        let created = match self.api.create_food(&request).await {
            Ok(created) => created,
            Err(err) => return Err(self.publish_failure("create", err)),
        };

        info!(food_id = created.id.0, "food created");
        state::apply(&mut self.state, StateChange::FoodCreated(created.clone()));
        let _ = self.events.send(ControllerEvent::FoodCreated(created.clone()));
        Ok(created)
    }

    /// Merges the input over the current record with that id and sends the
    /// full merged record. Only the matching element is replaced with the
    /// server's response; everything else is untouched. Fails before any
    /// request is issued when the id is unknown locally.
    pub async fn update(
        &mut self,
        id: FoodId,
        input: CreateFoodInput,
    ) -> Result<FoodItem, CatalogError> {
        let Some(current) = self.state.food(id).cloned() else {
            return Err(self.publish_failure("update", CatalogError::UnknownFood(id.0)));
        };

        let merged = current.merged_with(&input);
        let updated = match self.api.update_food(id, &merged).await {
            Ok(updated) => updated,
            Err(err) => return Err(self.publish_failure("update", err)),
        };

        info!(food_id = updated.id.0, "food updated");
        state::apply(&mut self.state, StateChange::FoodUpdated(updated.clone()));
        let _ = self.events.send(ControllerEvent::FoodUpdated(updated.clone()));
        Ok(updated)
    }

    /// No optimistic removal: the element leaves the local collection only
    /// after the server acknowledges the delete.
    pub async fn delete(&mut self, id: FoodId) -> Result<(), CatalogError> {
        if let Err(err) = self.api.delete_food(id).await {
            return Err(self.publish_failure("delete", err));
        }

        info!(food_id = id.0, "food deleted");
        state::apply(&mut self.state, StateChange::FoodDeleted(id));
        let _ = self.events.send(ControllerEvent::FoodDeleted(id));
        Ok(())
    }

    pub fn select_for_edit(&mut self, item: FoodItem) {
        state::apply(&mut self.state, StateChange::EditRequested(item));
    }

    pub fn toggle_create_modal(&mut self) {
        state::apply(&mut self.state, StateChange::CreateModalToggled);
    }

    pub fn toggle_edit_modal(&mut self) {
        state::apply(&mut self.state, StateChange::EditModalToggled);
    }

    fn publish_failure(&self, operation: &str, err: CatalogError) -> CatalogError {
        warn!(
            operation,
            transient = err.is_transient(),
            "catalog operation failed: {err}"
        );
        let _ = self
            .events
            .send(ControllerEvent::Error(format!("{operation} failed: {err}")));
        err
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
