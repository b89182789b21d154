//! Background fetches for the UI loop
//!
//! Each query runs as its own tokio task and reports back over an unbounded
//! channel, so the event loop keeps drawing while requests are in flight.

use tokio::sync::mpsc;

use crate::data::{ApiError, FilterCriteria, Location, LocationService};
use crate::pages::ListRequest;
use crate::sequence::RequestToken;

/// Results sent from fetch tasks to the main loop
#[derive(Debug)]
pub enum FetchMessage {
    Locations {
        token: RequestToken,
        result: Result<Vec<Location>, ApiError>,
    },
    Count {
        token: RequestToken,
        result: Result<u64, ApiError>,
    },
    Location {
        token: RequestToken,
        result: Result<Location, ApiError>,
    },
    Cities {
        token: RequestToken,
        result: Result<Vec<String>, ApiError>,
    },
    Countries(Result<Vec<String>, ApiError>),
    Categories(Result<Vec<String>, ApiError>),
}

/// Spawns fetch tasks against a shared `LocationService`
#[derive(Clone)]
pub struct Fetcher {
    service: LocationService,
    tx: mpsc::UnboundedSender<FetchMessage>,
}

impl Fetcher {
    /// Creates a fetcher and the receiver its results arrive on
    pub fn channel(service: LocationService) -> (Self, mpsc::UnboundedReceiver<FetchMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { service, tx }, rx)
    }

    fn spawn<F>(&self, work: F)
    where
        F: std::future::Future<Output = FetchMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = work.await;
            // The receiver is gone only once the app is shutting down
            let _ = tx.send(message);
        });
    }

    /// Dispatches the list and the count query of a home page request
    pub fn list(&self, request: ListRequest) {
        let ListRequest {
            list_token,
            count_token,
            criteria,
        } = request;
        tracing::debug!(?criteria, token = list_token.value(), "fetching locations");

        let service = self.service.clone();
        let list_criteria = criteria.clone();
        self.spawn(async move {
            FetchMessage::Locations {
                token: list_token,
                result: service.list_locations(&list_criteria).await,
            }
        });

        self.count(count_token, criteria);
    }

    pub fn count(&self, token: RequestToken, criteria: FilterCriteria) {
        let service = self.service.clone();
        self.spawn(async move {
            FetchMessage::Count {
                token,
                result: service.count_locations(&criteria).await,
            }
        });
    }

    pub fn location(&self, token: RequestToken, id: u64) {
        tracing::debug!(id, token = token.value(), "fetching location");
        let service = self.service.clone();
        self.spawn(async move {
            FetchMessage::Location {
                token,
                result: service.get_location_by_id(id).await,
            }
        });
    }

    pub fn cities(&self, token: RequestToken, country: Option<String>) {
        let service = self.service.clone();
        self.spawn(async move {
            FetchMessage::Cities {
                token,
                result: service.list_cities(country.as_deref()).await,
            }
        });
    }

    /// Loads the country and category option lists
    pub fn lookups(&self) {
        let service = self.service.clone();
        self.spawn(async move { FetchMessage::Countries(service.list_countries().await) });

        let service = self.service.clone();
        self.spawn(async move { FetchMessage::Categories(service.list_categories().await) });
    }
}
