//! JSON-RPC over HTTP implementation of [`ServerClient`].

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    AgentHandle, ClientError, ConnectionStatus, ContestHandle, GameKind, RawEvent, RequestId,
    ServerClient,
};

#[derive(Debug)]
struct Inner {
    url: String,
    http: reqwest::Client,
    next_id: AtomicU64,
    status: Mutex<ConnectionStatus>,
    close_reason: Mutex<Option<String>>,
    events: Mutex<VecDeque<RawEvent>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Inner {
    #[instrument(skip(self, params), fields(url = %self.url))]
    async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(id, "Sending JSON-RPC request");

        let response = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;

        if let Some(err) = body.get("error") {
            let message = err["message"].as_str().unwrap_or("Unknown error");
            let code = err["code"].as_i64().unwrap_or(0);
            error!(code, message, "Server returned error");
            return Err(ClientError::new(format!("Server error {}: {}", code, message)));
        }

        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Calls `method` and decodes its result, mapping every failure to `None`.
    async fn call_optional<T: DeserializeOwned>(&self, method: &str, params: Value) -> Option<T> {
        let result = match self.call(method, params).await {
            Ok(result) => result,
            Err(err) => {
                warn!(method, error = %err, "RPC failed");
                return None;
            }
        };
        match serde_json::from_value::<Option<T>>(result) {
            Ok(value) => value,
            Err(err) => {
                warn!(method, error = %err, "Unexpected RPC result");
                None
            }
        }
    }

    fn set_status(&self, status: ConnectionStatus) {
        *lock(&self.status) = status;
    }

    fn close(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(reason = %reason, "Connection closed");
        *lock(&self.close_reason) = Some(reason);
        self.set_status(ConnectionStatus::Closed);
    }

    fn enqueue(&self, events: Vec<Value>) {
        let mut queue = lock(&self.events);
        for value in events {
            match RawEvent::from_wire(value) {
                Ok(event) => {
                    debug!(kind = %event.kind, "Queued event");
                    queue.push_back(event);
                }
                Err(err) => error!(error = %err, "Dropping malformed event envelope"),
            }
        }
    }
}

/// Server client speaking JSON-RPC 2.0 over HTTP.
///
/// A background task performs the `hello` handshake, then polls
/// `poll_events` and fills the inbound queue until the link fails or the
/// client is dropped.
#[derive(Debug, Clone)]
pub struct HttpServerClient {
    inner: Arc<Inner>,
}

impl HttpServerClient {
    /// Starts connecting to `url`. Must be called inside a tokio runtime.
    #[instrument(skip(url), fields(url = %url.as_ref()))]
    pub fn connect(url: impl AsRef<str>, poll_interval: Duration) -> Self {
        info!("Connecting to contest server");
        let inner = Arc::new(Inner {
            url: url.as_ref().to_string(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
            status: Mutex::new(ConnectionStatus::Connecting),
            close_reason: Mutex::new(None),
            events: Mutex::new(VecDeque::new()),
        });
        tokio::spawn(drive(Arc::downgrade(&inner), poll_interval));
        Self { inner }
    }

    /// Server URL.
    pub fn url(&self) -> &str {
        &self.inner.url
    }
}

async fn drive(inner: Weak<Inner>, poll_interval: Duration) {
    let Some(link) = inner.upgrade() else {
        return;
    };
    match link.call("hello", json!({})).await {
        Ok(_) => {
            info!("Handshake complete");
            link.set_status(ConnectionStatus::Open);
        }
        Err(err) => {
            link.close(err.message);
            return;
        }
    }
    drop(link);

    let mut ticker = tokio::time::interval(poll_interval);
    loop {
        ticker.tick().await;
        let Some(link) = inner.upgrade() else {
            debug!("Client dropped, stopping event poll");
            break;
        };
        match link.call("poll_events", json!({})).await {
            Ok(Value::Array(events)) => link.enqueue(events),
            Ok(Value::Null) => {}
            Ok(other) => warn!(result = %other, "Unexpected poll_events result"),
            Err(err) => {
                link.close(err.message);
                break;
            }
        }
    }
}

#[async_trait::async_trait]
impl ServerClient for HttpServerClient {
    fn status(&self) -> ConnectionStatus {
        *lock(&self.inner.status)
    }

    fn close_reason(&self) -> Option<String> {
        lock(&self.inner.close_reason).clone()
    }

    async fn registered_games(&self) -> Vec<String> {
        self.inner
            .call_optional("get_registered_games", json!({}))
            .await
            .unwrap_or_default()
    }

    async fn registered_agents(&self) -> Vec<String> {
        self.inner
            .call_optional("get_registered_agents", json!({}))
            .await
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    async fn create_agent(&self, game: GameKind, agent: &str) -> Option<AgentHandle> {
        self.inner
            .call_optional(
                "create_agent",
                json!({ "game": game.to_string(), "agent": agent }),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn create_external_agent(&self) -> Option<AgentHandle> {
        self.inner
            .call_optional("create_external_agent", json!({}))
            .await
    }

    #[instrument(skip(self))]
    async fn create_contest(
        &self,
        game: GameKind,
        agents: [AgentHandle; 2],
        seed: u64,
        player_id: Option<&str>,
    ) -> Option<ContestHandle> {
        self.inner
            .call_optional(
                "create_contest",
                json!({
                    "game": game.to_string(),
                    "agents": agents,
                    "seed": seed,
                    "player_id": player_id,
                }),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn schedule_contest(&self, contest: ContestHandle) -> Option<u64> {
        self.inner
            .call_optional("schedule_contest", json!({ "contest": contest }))
            .await
    }

    #[instrument(skip(self))]
    async fn get_legal_actions(
        &self,
        contest: ContestHandle,
        agent: AgentHandle,
    ) -> Result<Vec<String>, ClientError> {
        let result = self
            .inner
            .call(
                "get_legal_actions",
                json!({ "contest": contest, "agent": agent }),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    #[instrument(skip(self))]
    fn reply_selected_action(&self, request_id: RequestId, action: &str) {
        let inner = Arc::clone(&self.inner);
        let params = json!({ "request_id": request_id, "action": action });
        tokio::spawn(async move {
            if let Err(err) = inner.call("reply_selected_action", params).await {
                error!(%request_id, error = %err, "Failed to send selected action");
            }
        });
    }

    fn get_next_event(&self) -> Option<RawEvent> {
        lock(&self.inner.events).pop_front()
    }
}
