#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use uuid::Uuid;

pub const INDEX_HTML: &str = "<!doctype html><title>Tariff admin</title>";

pub struct TestApp {
    pub base_url: String,
    pub frontend_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.frontend_dir);
    }
}

/// Real router over a fresh in-memory database, bound to an ephemeral port.
pub async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&DatabaseConfig::with_url("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;

    let frontend_dir = std::env::temp_dir().join(format!("tariff-admin-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&frontend_dir)?;
    std::fs::write(frontend_dir.join("index.html"), INDEX_HTML)?;

    let app = server::startup::build_app(db, &frontend_dir.to_string_lossy());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, frontend_dir })
}
