//! HTTP client for the booking store REST API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Booking, BookingCreate, DiningTable, Restaurant, ServiceItem};
use shared::{ApiResponse, AppError, BookingRepository, CatalogGateway, ErrorCode, StoreResult};

use crate::{ClientConfig, ClientError, ClientResult};

/// REST client; implements both store traits so the booking engine can run
/// against a remote store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Errors carry an `ApiResponse` envelope; anything else on a failure
    /// status is classified by the status code alone.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<()>>(&text)
                && envelope.code.is_some_and(|c| c != 0)
            {
                return Err(ClientError::Api(envelope.into_app_error()));
            }
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    ClientError::Api(AppError::with_message(ErrorCode::NotFound, text))
                }
                s if s.is_client_error() => ClientError::Api(AppError::invalid_request(text)),
                s => ClientError::Server {
                    status: s.as_u16(),
                    body: text,
                },
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn store<T>(&self, result: ClientResult<T>) -> StoreResult<T> {
        result.map_err(|e| {
            tracing::debug!(error = %e, "Store request failed");
            e.into_store_error(self.timeout_ms)
        })
    }
}

#[async_trait]
impl CatalogGateway for HttpClient {
    async fn get_restaurant(&self, id: i64) -> StoreResult<Restaurant> {
        self.store(self.get(&format!("restaurants/{id}")).await)
    }

    async fn list_tables(&self, restaurant_id: i64) -> StoreResult<Vec<DiningTable>> {
        self.store(self.get(&format!("tables?restaurantId={restaurant_id}")).await)
    }

    async fn list_services(&self, restaurant_id: i64) -> StoreResult<Vec<ServiceItem>> {
        self.store(self.get(&format!("services?restaurantId={restaurant_id}")).await)
    }
}

#[async_trait]
impl BookingRepository for HttpClient {
    async fn create(&self, data: BookingCreate) -> StoreResult<Booking> {
        self.store(self.post("bookings", &data).await)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Booking> {
        self.store(self.get(&format!("bookings/{id}")).await)
    }

    async fn replace(&self, booking: Booking) -> StoreResult<Booking> {
        self.store(self.put(&format!("bookings/{}", booking.id), &booking).await)
    }

    async fn list_by_restaurant(&self, restaurant_id: i64) -> StoreResult<Vec<Booking>> {
        self.store(self.get(&format!("bookings?restaurantId={restaurant_id}")).await)
    }

    async fn list_by_customer(&self, customer_id: i64) -> StoreResult<Vec<Booking>> {
        self.store(self.get(&format!("bookings?customerId={customer_id}")).await)
    }
}
