#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::repositories::LinkRepository;
use tinylink::error::AppError;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Link store kept in memory, for handler tests that don't need Postgres.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::code_conflict(
                "Code already exists",
                serde_json::json!({}),
            ));
        }

        let link = Link::new(new_link.code, new_link.target_url, 0, Utc::now(), None);
        links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn record_click(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut links = self.links.lock().unwrap();

        Ok(links.iter_mut().find(|l| l.code == code).map(|l| {
            l.clicks += 1;
            l.last_clicked = Some(Utc::now());
            l.target_url.clone()
        }))
    }

    async fn list(&self, search: Option<String>) -> Result<Vec<Link>, AppError> {
        let links = self.links.lock().unwrap();
        let needle = search.map(|s| s.to_lowercase());

        let mut result: Vec<Link> = links
            .iter()
            .rev()
            .filter(|l| match &needle {
                Some(n) => {
                    l.code.to_lowercase().contains(n) || l.target_url.to_lowercase().contains(n)
                }
                None => true,
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.code != code);

        Ok(links.len() < before)
    }
}

fn store_down() -> AppError {
    AppError::store_unavailable("Database error", serde_json::json!({}))
}

/// Store whose every call fails, as when the database is unreachable.
///
/// Counts calls so tests can tell whether a request reached the store.
#[derive(Default)]
pub struct FailingLinkRepository {
    calls: AtomicUsize,
}

impl FailingLinkRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(store_down())
    }
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        self.fail()
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        self.fail()
    }

    async fn record_click(&self, _code: &str) -> Result<Option<String>, AppError> {
        self.fail()
    }

    async fn list(&self, _search: Option<String>) -> Result<Vec<Link>, AppError> {
        self.fail()
    }

    async fn delete(&self, _code: &str) -> Result<bool, AppError> {
        self.fail()
    }
}

/// Store in which every code is already taken, so generation never succeeds.
pub struct SaturatedLinkRepository;

#[async_trait]
impl LinkRepository for SaturatedLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(AppError::code_conflict(
            "Code already exists",
            serde_json::json!({}),
        ))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(Some(Link::new(
            code.to_string(),
            "https://taken.example".to_string(),
            0,
            Utc::now(),
            None,
        )))
    }

    async fn record_click(&self, _code: &str) -> Result<Option<String>, AppError> {
        Ok(Some("https://taken.example/".to_string()))
    }

    async fn list(&self, _search: Option<String>) -> Result<Vec<Link>, AppError> {
        Ok(vec![])
    }

    async fn delete(&self, _code: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Builds state over a store that fails every call and returns both.
pub fn create_failing_state() -> (AppState, Arc<FailingLinkRepository>) {
    let repo = Arc::new(FailingLinkRepository::default());
    let state = AppState::new(repo.clone(), TEST_BASE_URL);

    (state, repo)
}

/// Builds state over a store with no free codes.
pub fn create_saturated_state() -> AppState {
    AppState::new(Arc::new(SaturatedLinkRepository), TEST_BASE_URL)
}

/// Builds state over a fresh in-memory store and returns both.
pub fn create_memory_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), TEST_BASE_URL);

    (state, repo)
}

/// Builds state over a Postgres pool.
pub fn create_pg_state(pool: PgPool) -> AppState {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(repo, TEST_BASE_URL)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO links (code, target_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn fetch_clicks(pool: &PgPool, code: &str) -> (i64, Option<chrono::DateTime<Utc>>) {
    sqlx::query_as("SELECT clicks, last_clicked FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
