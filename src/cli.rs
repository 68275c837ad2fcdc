use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, ValueEnum};
use duration_string::DurationString;
use k8s_openapi::api::core::v1::Secret;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::core::ObjectList;
use kube::Config;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::client::{Typed, Unstructured};
use crate::dump::{KindsDump, RegistryDump};
use crate::error::{ConfigurationError, Result};
use crate::manager::Manager;
use crate::scheme::{builtin, openshift, Scheme, TypeKey};
use crate::signals;

/// Dump the resource types known to the client and compare typed and
/// unstructured reads of the cluster's secrets.
#[derive(Parser, Debug)]
#[command(name = "kubectl-scheme-probe", version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: Connection,

    /// Namespace to list secrets in. All namespaces when omitted.
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// How long to wait for the initial cache sync, e.g. "30s" or "2m".
    #[arg(long, default_value = "30s")]
    pub sync_timeout: DurationString,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Args, Clone, Debug, Default)]
pub struct Connection {
    /// Path to a kubeconfig file. Falls back to $KUBECONFIG, ~/.kube/config
    /// and the in-cluster service account.
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one.
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
}

impl Connection {
    pub async fn client_config(&self) -> Result<Config> {
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        };

        let config = match (&self.kubeconfig, &self.context) {
            (Some(path), _) => {
                let kubeconfig = Kubeconfig::read_from(path).map_err(ConfigurationError::from)?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(ConfigurationError::from)?
            }
            (None, Some(_)) => Config::from_kubeconfig(&options)
                .await
                .map_err(ConfigurationError::from)?,
            (None, None) => Config::infer().await.map_err(ConfigurationError::from)?,
        };

        Ok(config)
    }
}

impl Cli {
    #[instrument(skip_all)]
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.connection.client_config().await?;
        let manager = Manager::new(config, self.namespace.clone()).await?;
        let cancel = signals::shutdown_token();

        let counts = run_with(
            manager,
            self.sync_timeout.into(),
            &cancel,
            self.output,
            &mut io::stdout(),
        )
        .await?;
        if counts.unstructured != counts.typed {
            warn!(
                unstructured = counts.unstructured,
                typed = counts.typed,
                "typed and unstructured listings disagree"
            );
        }

        Ok(())
    }
}

/// Number of secrets seen by each kind of listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecretCounts {
    pub unstructured: usize,
    pub typed: usize,
}

/// Everything after connecting: sync the cache, dump the scheme to `out`
/// and list secrets both ways.
pub async fn run_with(
    mut manager: Manager,
    sync_timeout: Duration,
    cancel: &CancellationToken,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<SecretCounts> {
    manager.cache_mut().watch::<Secret>();
    manager.cache().wait_for_cache_sync(cancel, sync_timeout).await?;

    let mut scheme = Scheme::new();
    scheme.install(&[builtin::add_to_scheme])?;
    scheme.install(&[openshift::add_to_scheme])?;

    let registry = scheme.all_known_types();
    info!(types = registry.len(), "scheme installed");
    let dump = RegistryDump::new(&registry);
    let kinds = scheme.object_kinds::<ObjectList<Secret>>()?;
    match output {
        OutputFormat::Text => write!(out, "{dump}{}", KindsDump(&kinds))?,
        OutputFormat::Yaml => write!(out, "{}", dump.to_yaml(&kinds)?)?,
    }
    out.flush()?;

    let client = manager.client();

    let list_key = TypeKey::of::<Secret>().list_key();
    let descriptor = scheme.resolve(&list_key)?;
    let unstructured = client.list(&Unstructured::new(&list_key, descriptor)).await?;
    info!(secrets = unstructured, "listed unstructured secrets");

    let typed = client.list(&Typed::<Secret>::new()).await?;
    info!(secrets = typed, "listed typed secrets");

    Ok(SecretCounts { unstructured, typed })
}
