//! Remote catalog reads (states and cities)

use crate::constants::APP_VERSION;
use crate::error::FetchError;
use crate::types::{IbgeCity, IbgeUf, LocalityName, RegionCode};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Where the pickers get their options from.
pub trait CatalogSource: Send + Sync {
    /// All states, ordered by name
    fn regions(&self) -> BoxFuture<'static, Result<Vec<RegionCode>, FetchError>>;

    /// All cities of `region`, ordered by name
    fn localities(
        &self,
        region: &RegionCode,
    ) -> BoxFuture<'static, Result<Vec<LocalityName>, FetchError>>;
}

/// IBGE `localidades` API client
#[derive(Clone)]
pub struct IbgeCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl IbgeCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("ecoleta-picker/{}", APP_VERSION))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    url.query_pairs_mut().append_pair("orderBy", "nome");
    Ok(url)
}

/// `GET {base}/estados?orderBy=nome`
pub fn regions_url(base: &str) -> Result<Url, FetchError> {
    endpoint(base, &["estados"])
}

/// `GET {base}/estados/{uf}/municipios?orderBy=nome`
pub fn localities_url(base: &str, region: &RegionCode) -> Result<Url, FetchError> {
    endpoint(base, &["estados", region.as_str(), "municipios"])
}

async fn get_json<T: DeserializeOwned>(client: reqwest::Client, url: Url) -> Result<T, FetchError> {
    debug!(url = %url, "Fetching catalog");
    let response = client.get(url.clone()).send().await.map_err(|e| {
        warn!(url = %url, error = %e, "Catalog request failed");
        FetchError::from(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, status = %status, "Catalog service returned error status");
        return Err(FetchError::Status(status));
    }

    response.json::<T>().await.map_err(|e| {
        warn!(url = %url, error = %e, "Failed to decode catalog response");
        FetchError::from(e)
    })
}

async fn fetch_regions(
    client: reqwest::Client,
    url: Result<Url, FetchError>,
) -> Result<Vec<RegionCode>, FetchError> {
    let ufs: Vec<IbgeUf> = get_json(client, url?).await?;
    debug!(count = ufs.len(), "States loaded");
    Ok(ufs.into_iter().map(|uf| RegionCode::new(uf.sigla)).collect())
}

async fn fetch_localities(
    client: reqwest::Client,
    url: Result<Url, FetchError>,
    region: RegionCode,
) -> Result<Vec<LocalityName>, FetchError> {
    let cities: Vec<IbgeCity> = get_json(client, url?).await?;
    debug!(uf = %region, count = cities.len(), "Cities loaded");
    Ok(cities.into_iter().map(|c| LocalityName::new(c.nome)).collect())
}

impl CatalogSource for IbgeCatalog {
    fn regions(&self) -> BoxFuture<'static, Result<Vec<RegionCode>, FetchError>> {
        fetch_regions(self.client.clone(), regions_url(&self.base_url)).boxed()
    }

    fn localities(
        &self,
        region: &RegionCode,
    ) -> BoxFuture<'static, Result<Vec<LocalityName>, FetchError>> {
        let url = localities_url(&self.base_url, region);
        fetch_localities(self.client.clone(), url, region.clone()).boxed()
    }
}
