// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Thin HTTP client over the control API (§4.8, §6). Every method maps
//! to exactly one route in `sprintdeck_daemon::api::router` and returns
//! the same JSON shape the route produces — this client does no
//! interpretation of the response beyond deserializing it.

use serde::Deserialize;
use sprintdeck_core::{LearningCollection, Memory, SprintState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not reach sprintdeckd at {addr}: {source}")]
    Unreachable { addr: String, source: reqwest::Error },
    #[error("sprintdeckd returned {status}: {message}")]
    Rejected { status: reqwest::StatusCode, message: String },
    #[error("malformed response from sprintdeckd: {0}")]
    Decode(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Talks to one running `sprintdeckd` instance at `base_url`.
pub struct DaemonClient {
    http: reqwest::Client,
    base_url: String,
}

impl DaemonClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.http.get(&url).send().await.map_err(|source| ClientError::Unreachable { addr: url.clone(), source })?;
        Self::into_body(resp).await
    }

    async fn post<B: serde::Serialize, T: serde::de::DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Unreachable { addr: url.clone(), source })?;
        Self::into_body(resp).await
    }

    async fn post_empty<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.post(path, &serde_json::json!({})).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self.http.delete(&url).send().await.map_err(|source| ClientError::Unreachable { addr: url.clone(), source })?;
        let _: serde_json::Value = Self::into_body(resp).await?;
        Ok(())
    }

    async fn into_body<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let message = resp.json::<ErrorBody>().await.map(|b| b.message).unwrap_or_else(|_| status.to_string());
            Err(ClientError::Rejected { status, message })
        }
    }

    pub async fn state(&self) -> Result<SprintState, ClientError> {
        self.get("/api/state").await
    }

    pub async fn launch(&self) -> Result<SprintState, ClientError> {
        self.post_empty("/api/launch").await
    }

    pub async fn pause(&self) -> Result<serde_json::Value, ClientError> {
        self.post_empty("/api/pause").await
    }

    pub async fn stop(&self) -> Result<serde_json::Value, ClientError> {
        self.post_empty("/api/stop").await
    }

    pub async fn checkpoint(&self, task_id: &str) -> Result<serde_json::Value, ClientError> {
        self.post("/api/checkpoint", &serde_json::json!({ "taskId": task_id })).await
    }

    pub async fn checkpoint_release(&self) -> Result<serde_json::Value, ClientError> {
        self.post_empty("/api/checkpoint/release").await
    }

    pub async fn dismiss_escalation(&self) -> Result<serde_json::Value, ClientError> {
        self.post_empty("/api/dismiss-escalation").await
    }

    pub async fn dismiss_merge_conflict(&self) -> Result<serde_json::Value, ClientError> {
        self.post_empty("/api/dismiss-merge-conflict").await
    }

    pub async fn resume(&self) -> Result<SprintState, ClientError> {
        self.post_empty("/api/resume").await
    }

    pub async fn memories(&self, role: Option<&str>, query: Option<&str>) -> Result<Vec<Memory>, ClientError> {
        let mut path = "/api/memories".to_string();
        let mut params = Vec::new();
        if let Some(role) = role {
            params.push(format!("role={role}"));
        }
        if let Some(query) = query {
            params.push(format!("q={query}"));
        }
        if !params.is_empty() {
            path.push('?');
            path.push_str(&params.join("&"));
        }
        self.get(&path).await
    }

    pub async fn add_memory(&self, role: &str, key: &str, value: &str) -> Result<Memory, ClientError> {
        self.post("/api/memories", &serde_json::json!({ "role": role, "key": key, "value": value })).await
    }

    pub async fn remove_memory(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/memories/{id}")).await
    }

    pub async fn process_learnings(&self) -> Result<LearningCollection, ClientError> {
        self.get("/api/process-learnings").await
    }

    pub async fn remove_process_learning(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/process-learnings/{id}")).await
    }

    pub async fn history(&self) -> Result<Vec<String>, ClientError> {
        self.get("/api/history").await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
