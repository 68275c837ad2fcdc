use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use futures::{future, StreamExt};
use kube::runtime::reflector::{self, Store};
use kube::runtime::{watcher, WatchStreamExt};
use kube::Resource;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::{Client, ScopedApi};
use crate::error::{Error, Result};
use crate::scheme::TypeKey;

#[async_trait]
trait Informer: Send + Sync {
    fn key(&self) -> &TypeKey;

    /// Resolves once the initial list has been applied, `false` if the
    /// informer stopped before that.
    async fn synced(&self) -> bool;
}

struct Reflector<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    key: TypeKey,
    store: Store<K>,
    task: JoinHandle<()>,
}

impl<K> Drop for Reflector<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[async_trait]
impl<K> Informer for Reflector<K>
where
    K: Resource<DynamicType = ()> + Clone + Send + Sync + 'static,
{
    fn key(&self) -> &TypeKey {
        &self.key
    }

    async fn synced(&self) -> bool {
        self.store.wait_until_ready().await.is_ok()
    }
}

/// Local view of the watched resource types, kept current by one reflector each.
pub struct Cache {
    client: Client,
    informers: Vec<Box<dyn Informer>>,
}

impl Cache {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            informers: Vec::new(),
        }
    }

    /// Starts watching `K` in the client's namespace (or cluster wide).
    pub fn watch<K>(&mut self)
    where
        K: ScopedApi
            + Resource<DynamicType = ()>
            + Clone
            + DeserializeOwned
            + Debug
            + Send
            + Sync
            + 'static,
    {
        let key = TypeKey::of::<K>();
        let api = K::scoped_api(self.client.kube_client(), self.client.namespace());
        let (store, writer) = reflector::store();
        let stream = reflector::reflector(
            writer,
            watcher(api, watcher::Config::default()).default_backoff(),
        );

        let task = tokio::spawn({
            let key = key.clone();
            async move {
                stream
                    .for_each(|event| {
                        if let Err(err) = event {
                            warn!(kind = %key, %err, "watch failed");
                        }
                        future::ready(())
                    })
                    .await;
            }
        });

        debug!(kind = %key, "started informer");
        self.informers.push(Box::new(Reflector { key, store, task }));
    }

    /// Blocks until every informer has synced.
    ///
    /// Fails if `cancel` fires, `timeout` elapses or an informer stops
    /// first. A cache with nothing to watch is synced right away.
    pub async fn wait_for_cache_sync(&self, cancel: &CancellationToken, timeout: Duration) -> Result<()> {
        let synced = future::join_all(self.informers.iter().map(|informer| async move {
            let synced = informer.synced().await;
            debug!(kind = %informer.key(), synced, "informer finished initial sync");
            (informer.key(), synced)
        }));

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!("cache sync cancelled");
                Err(Error::SyncCancelled)
            }
            result = tokio::time::timeout(timeout, synced) => match result {
                Ok(informers) => match informers.into_iter().find(|(_, synced)| !synced) {
                    Some((key, _)) => Err(Error::SyncStopped { kind: key.to_string() }),
                    None => Ok(()),
                },
                Err(_) => {
                    warn!(?timeout, "timed out waiting for cache sync");
                    Err(Error::SyncTimeout(timeout))
                }
            },
        }
    }
}
