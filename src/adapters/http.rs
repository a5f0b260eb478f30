use crate::core::{Appointment, Barber, BookingApi, ConfigProvider, NewAppointment, Service};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// REST client for the booking backend.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
}

impl HttpBookingApi {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("api.base_url", config.api_endpoint())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_endpoint().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = ensure_success(response, &url)?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn ensure_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BookingError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl BookingApi for HttpBookingApi {
    async fn barbers(&self) -> Result<Vec<Barber>> {
        self.get_json("barbers").await
    }

    async fn services(&self) -> Result<Vec<Service>> {
        self.get_json("services").await
    }

    async fn appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json("appointments").await
    }

    async fn book_appointment(&self, appointment: &NewAppointment) -> Result<()> {
        let url = self.url("appointments");
        tracing::debug!("Posting appointment to: {}", url);

        let response = self.client.post(&url).json(appointment).send().await?;
        tracing::debug!("API response status: {}", response.status());

        ensure_success(response, &url)?;
        Ok(())
    }
}
