use std::time::Duration;

use kube::config::{InferConfigError, KubeconfigError};
use thiserror::Error;

use crate::scheme::{InstallError, NotRegistered};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a run can fail. None of these are recovered.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to load client configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("unable to initialize manager: {0}")]
    ManagerInit(#[source] kube::Error),

    #[error("cache did not sync within {0:?}")]
    SyncTimeout(Duration),

    #[error("cache sync cancelled by shutdown signal")]
    SyncCancelled,

    #[error("informer for {kind} stopped before syncing")]
    SyncStopped { kind: String },

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    KindResolution(#[from] NotRegistered),

    #[error("list {kind} failed: {source}")]
    Client {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("unable to render YAML output: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("unable to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Infer(#[from] InferConfigError),

    #[error(transparent)]
    Kubeconfig(#[from] KubeconfigError),
}
