//! The [`Manager`] bundles everything talking to one API server: a
//! [`Client`] for direct reads and a [`Cache`] of watched types.

use tracing::info;

use crate::client::Client;
use crate::error::{Error, Result};

mod cache;

pub use cache::Cache;

pub struct Manager {
    client: Client,
    cache: Cache,
}

impl Manager {
    /// Connects to the API server described by `config`.
    ///
    /// Fails if the client cannot be built or the server cannot be reached.
    pub async fn new(config: kube::Config, namespace: Option<String>) -> Result<Self> {
        let cluster_url = config.cluster_url.clone();
        let inner = kube::Client::try_from(config).map_err(Error::ManagerInit)?;
        let version = inner
            .apiserver_version()
            .await
            .map_err(Error::ManagerInit)?;
        info!(%cluster_url, version = %version.git_version, "connected to API server");

        Ok(Self::from_client(Client::new(inner, namespace)))
    }

    pub fn from_client(client: Client) -> Self {
        let cache = Cache::new(client.clone());
        Self { client, cache }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }
}
