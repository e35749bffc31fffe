use crate::http;
use crate::page::{self, Page};
use crate::{Error, Pokemon, Result};

use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://pokeapi.co/api/v2";

/// A client of the PokeAPI data source.
///
/// Every call is a fresh round trip: nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

/// A named link to a full Pokémon record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Summary {
    pub name: String,
    pub url: String,
}

/// One page of the Pokémon listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Listing {
    pub count: usize,
    #[serde(default)]
    pub results: Vec<Summary>,
}

impl Listing {
    pub fn total_pages(&self, per_page: usize) -> usize {
        page::total(self.count, per_page)
    }
}

/// The full records of a page of the listing.
#[derive(Debug, Clone)]
pub struct Contents {
    pub page: Page,
    pub total_pages: usize,
    pub pokemon: Vec<Pokemon>,
}

impl PokeApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        log::info!("PokeAPI session started ({base_url})");

        Self {
            client: http::client(timeout),
            base_url,
        }
    }

    pub async fn list_summaries(&self, offset: usize, limit: usize) -> Result<Listing> {
        let url = format!(
            "{base_url}/pokemon?offset={offset}&limit={limit}",
            base_url = self.base_url
        );

        log::info!("Fetching listing: {url}");
        let response = self.client.get(&url).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetches a Pokémon by name (case-insensitively) or by numeric id.
    pub async fn get_by_name_or_id(&self, key: &str) -> Result<Pokemon> {
        let key = key.trim().to_lowercase();

        // PokeAPI names only contain lowercase letters, digits and dashes
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::NotFound(key));
        }

        let url = format!("{base_url}/pokemon/{key}", base_url = self.base_url);

        log::info!("Fetching pokémon: {url}");
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(key));
        }

        Ok(response.error_for_status()?.json().await?)
    }

    /// Every type name, in PokeAPI order.
    pub async fn list_types(&self) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            next: Option<String>,
            results: Vec<Summary>,
        }

        let mut types = Vec::new();
        let mut next = Some(format!("{base_url}/type", base_url = self.base_url));

        while let Some(url) = next {
            log::info!("Fetching types: {url}");

            let response: Response = self
                .client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            types.extend(response.results.into_iter().map(|type_| type_.name));
            next = response.next;
        }

        Ok(types)
    }

    /// Fetches the listing of a page and the full record of every entry in it.
    pub async fn fetch_page(&self, page: Page, per_page: usize) -> Result<Contents> {
        use futures_util::future;

        let listing = self
            .list_summaries(page.offset(per_page), per_page)
            .await?;

        let pokemon = future::try_join_all(
            listing
                .results
                .iter()
                .map(|summary| self.get_by_name_or_id(&summary.name)),
        )
        .await?;

        Ok(Contents {
            page,
            total_pages: listing.total_pages(per_page),
            pokemon,
        })
    }

    pub async fn download_sprite(&self, url: &str) -> Result<Bytes> {
        log::info!("Downloading sprite: {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;

        Ok(response.bytes().await?)
    }
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(DEFAULT_URL, Duration::from_secs(5))
    }
}
