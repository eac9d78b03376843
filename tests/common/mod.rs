#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use library_access::access::{AccessEvaluator, SubscriptionFreshness};
use library_access::auth::JwtKeys;
use library_access::routes;
use library_access::state::AppState;
use library_access::testing::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// An evaluator over a fresh in-memory store
pub fn evaluator(freshness: SubscriptionFreshness) -> (Arc<MemoryStore>, AccessEvaluator) {
    let store = Arc::new(MemoryStore::new());
    let evaluator = AccessEvaluator::new(store.clone(), store.clone()).with_freshness(freshness);
    (store, evaluator)
}

/// The full router served on an ephemeral local port
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub keys: JwtKeys,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let keys = JwtKeys::new(TEST_SECRET, 1);
        let state = AppState::new(store.clone(), keys.clone(), SubscriptionFreshness::StatusOnly);
        let app = routes::router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            store,
            keys,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.keys.issue(user_id).expect("token")
    }

    pub async fn get_as(&self, user_id: Uuid, path: &str) -> Result<(reqwest::StatusCode, serde_json::Value)> {
        let res = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token_for(user_id))
            .send()
            .await?;
        read(res).await
    }

    pub async fn patch_as(
        &self,
        user_id: Uuid,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(reqwest::StatusCode, serde_json::Value)> {
        let res = self
            .client
            .patch(self.url(path))
            .bearer_auth(self.token_for(user_id))
            .json(&body)
            .send()
            .await?;
        read(res).await
    }

    pub async fn delete_as(&self, user_id: Uuid, path: &str) -> Result<(reqwest::StatusCode, serde_json::Value)> {
        let res = self
            .client
            .delete(self.url(path))
            .bearer_auth(self.token_for(user_id))
            .send()
            .await?;
        read(res).await
    }
}

async fn read(res: reqwest::Response) -> Result<(reqwest::StatusCode, serde_json::Value)> {
    let status = res.status();
    let body = res.json::<serde_json::Value>().await?;
    Ok((status, body))
}
