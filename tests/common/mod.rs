// Test helpers are intentionally partially used
#![allow(dead_code)]

use anyhow::{bail, Result};
use axum::Router;
use chrono::{TimeZone, Utc};
use portfolio_server::domain::{Entry, MetricsPtr, Repository, RepositoryPtr, Section};
use portfolio_server::{build_router, PrometheusMetrics, SiteConfig};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// In-memory repository
// ============================================================================

/// Repository double that keeps everything in memory.
///
/// `set_offline(true)` makes every call fail, standing in for a lost
/// database connection.
#[derive(Default)]
pub struct MemoryRepository {
    // ---
    sections: Mutex<Vec<Section>>,
    entries: Mutex<Vec<Entry>>,
    offline: AtomicBool,
}

impl MemoryRepository {
    // ---
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        // ---
        let repo = Self::default();
        *repo.entries.lock().unwrap() = entries;
        repo
    }

    pub fn set_offline(&self, offline: bool) {
        // ---
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        // ---
        if self.offline.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn ping(&self) -> Result<()> {
        self.check_online()
    }

    async fn seed_sections(&self, sections: &[Section]) -> Result<usize> {
        // ---
        self.check_online()?;
        let mut stored = self.sections.lock().unwrap();
        let mut inserted = 0;
        for section in sections {
            if !stored.iter().any(|s| s.name == section.name) {
                stored.push(section.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn list_sections(&self) -> Result<Vec<Section>> {
        // ---
        self.check_online()?;
        Ok(self.sections.lock().unwrap().clone())
    }

    async fn list_entries(&self, limit: Option<i64>) -> Result<Vec<Entry>> {
        // ---
        self.check_online()?;
        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            entries.truncate(limit.max(0) as usize);
        }
        Ok(entries)
    }
}

/// Builds an entry created `day` days into 2024.
pub fn entry(id: i32, title: &str, day: u32) -> Entry {
    // ---
    Entry {
        id,
        title: title.to_string(),
        content: format!("{title} content"),
        created: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
    }
}

// ============================================================================
// Test Setup
// ============================================================================

/// A router wired to an in-memory repository and its own metrics registry.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<MemoryRepository>,
    pub metrics: Arc<PrometheusMetrics>,
}

impl TestApp {
    // ---
    pub fn new(repository: MemoryRepository) -> Self {
        // ---
        Self::with_site(repository, SiteConfig::default())
    }

    pub fn with_site(repository: MemoryRepository, site: SiteConfig) -> Self {
        // ---
        let repository = Arc::new(repository);
        let metrics = Arc::new(PrometheusMetrics::new().expect("metrics registry"));

        let shared_repo: RepositoryPtr = repository.clone();
        let shared_metrics: MetricsPtr = metrics.clone();
        let router = build_router(shared_metrics, shared_repo, site);

        Self {
            router,
            repository,
            metrics,
        }
    }
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
    pub app_metrics: Arc<PrometheusMetrics>,
}

impl TestServer {
    // ---
    pub async fn new(app: TestApp) -> Self {
        // --
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app.router;

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            addr,
            client,
            app_metrics: app.metrics,
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
