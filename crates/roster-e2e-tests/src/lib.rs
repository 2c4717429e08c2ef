pub mod rest;

use std::{fmt::Display, path::Path, time::Duration};

use anyhow::{Result, anyhow};
use reqwest::Url;
use roster_server::config::{Parser, ServerConfig};
use rand::Rng as _;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::info;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, base_dir: &Path) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix_in(format!("{}_", test_name), base_dir)?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let args = &["roster-e2e-tests", "--data-dir", &data_dir, "--port", &port];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

/// Config with fresh data dir and migrated database, server is not started yet
pub async fn prepare_env(test_name: &str) -> Result<(ServerConfig, ConfigGuard)> {
    let (args, guard) = test_config(test_name, &std::env::temp_dir())?;
    let pool = roster_dal::new_pool(&args.database_url()).await?;
    roster_dal::migrate(&pool).await?;
    pool.close().await;
    Ok((args, guard))
}

pub fn base_url(args: &ServerConfig) -> Url {
    // port is u16, so the url is always valid
    Url::parse(&format!("http://127.0.0.1:{}/", args.port)).expect("valid base url")
}

pub fn extend_url(url: &Url, segment: impl Display) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("base url")
        .push(&segment.to_string());
    url
}

/// Stops the server when dropped
pub struct ServerGuard {
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

pub async fn spawn_server(args: ServerConfig) -> Result<ServerGuard> {
    let base_url = base_url(&args);
    let state = roster_server::run::build_state(&args).await?;
    let (sender, receiver) = oneshot::channel::<()>();
    let shutdown = async move {
        let _ = receiver.await;
    };
    tokio::spawn(async move {
        if let Err(e) = roster_server::run::run_graceful_with_state(args, state, shutdown).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let client = reqwest::Client::new();
    let health = base_url.join("health")?;
    for _ in 0..50 {
        if let Ok(response) = client.get(health.clone()).send().await {
            if response.status().is_success() {
                info!("Server ready at {base_url}");
                return Ok(ServerGuard {
                    shutdown: Some(sender),
                });
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server did not start"))
}

pub async fn launch_env(args: ServerConfig) -> Result<(reqwest::Client, Url, ServerGuard)> {
    let base_url = base_url(&args);
    let guard = spawn_server(args).await?;
    let client = reqwest::Client::builder().build()?;
    Ok((client, base_url, guard))
}
