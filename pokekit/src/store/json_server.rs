use crate::http;
use crate::store::{Backend, Collection};
use crate::{Error, Result};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// A REST store speaking the json-server dialect.
///
/// Every collection lives at `{base_url}/{collection}` and every item at
/// `{base_url}/{collection}/{id}`.
#[derive(Debug, Clone)]
pub struct JsonServer {
    client: reqwest::Client,
    base_url: String,
}

impl JsonServer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        log::info!("Persistence store session started ({base_url})");

        Self {
            client: http::client(timeout),
            base_url,
        }
    }

    fn url(&self, collection: Collection, id: Option<u32>) -> String {
        match id {
            Some(id) => format!("{}/{collection}/{id}", self.base_url),
            None => format!("{}/{collection}", self.base_url),
        }
    }
}

#[async_trait]
impl Backend for JsonServer {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let url = self.url(collection, None);

        log::info!("Listing {collection}: {url}");
        let response = self.client.get(&url).send().await.map_err(unavailable)?;
        let response = check(response, collection, None)?;

        response.json().await.map_err(unavailable)
    }

    async fn create(&self, collection: Collection, item: Value) -> Result<Value> {
        let url = self.url(collection, None);

        log::info!("Creating item in {collection}: {url}");
        let response = self
            .client
            .post(&url)
            .json(&item)
            .send()
            .await
            .map_err(unavailable)?;
        let response = check(response, collection, None)?;

        response.json().await.map_err(unavailable)
    }

    async fn delete(&self, collection: Collection, id: u32) -> Result<()> {
        let url = self.url(collection, Some(id));

        log::info!("Deleting item from {collection}: {url}");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(unavailable)?;
        let _ = check(response, collection, Some(id))?;

        Ok(())
    }
}

fn check(
    response: reqwest::Response,
    collection: Collection,
    id: Option<u32>,
) -> Result<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    Err(match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Error::MissingItem { collection, id },
        _ => Error::PersistenceUnavailable(
            format!("{url} answered {status}", url = response.url()).into(),
        ),
    })
}

fn unavailable(error: reqwest::Error) -> Error {
    Error::PersistenceUnavailable(error.to_string().into())
}
