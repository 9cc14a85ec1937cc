//! Non-blocking HTTP requests delivered back to the UI thread.
//!
//! Callers start a request and get a [`RequestId`] back immediately. The
//! outcome arrives later as a [`RequestEvent`] carrying a terminal
//! [`RequestState`]. Cancellation is cooperative: it turns the eventual event
//! into `Cancelled` rather than stopping anything synchronously.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use crossbeam_channel::{Receiver, Sender};
use reqwest::StatusCode;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("ProductGallery/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Active,
    Completed,
    Unauthorized,
    Failed,
    Cancelled,
}

impl RequestState {
    /// Whether the request is finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Idle | Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Unauthorized => "Unauthorized",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    pub body: Bytes,
}

impl Response {
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEvent {
    pub id: RequestId,
    pub state: RequestState,
    /// Present whenever the server answered
    pub response: Option<Response>,
}

impl RequestEvent {
    pub fn cancelled(id: RequestId) -> Self {
        Self {
            id,
            state: RequestState::Cancelled,
            response: None,
        }
    }
}

/// Asynchronous request issuer.
pub trait HttpClient {
    /// Issue a GET for `url`. Returns immediately.
    fn start(&mut self, url: &str) -> RequestId;

    /// Ask for `id` to end as `Cancelled`. Unknown or finished ids are ignored.
    fn cancel(&mut self, id: RequestId);
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// [`HttpClient`] backed by `reqwest` on a small tokio runtime.
///
/// Results are queued on a channel and handed out by [`ReqwestClient::poll`]
/// on the thread that owns the client.
pub struct ReqwestClient {
    runtime: Option<Runtime>,
    client: reqwest::Client,
    next_id: u64,
    in_flight: HashMap<RequestId, JoinHandle<()>>,
    result_tx: Sender<RequestEvent>,
    result_rx: Receiver<RequestEvent>,
    cancelled: VecDeque<RequestEvent>,
    waker: Option<Waker>,
}

impl ReqwestClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("http-worker")
            .enable_all()
            .build()?;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        Ok(Self {
            runtime: Some(runtime),
            client,
            next_id: 1,
            in_flight: HashMap::new(),
            result_tx,
            result_rx,
            cancelled: VecDeque::new(),
            waker: None,
        })
    }

    /// Called from a worker thread whenever a result becomes available.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Drain every terminal event that is ready. Each started request yields
    /// exactly one event.
    pub fn poll(&mut self) -> Vec<RequestEvent> {
        let mut events: Vec<RequestEvent> = self.cancelled.drain(..).collect();
        while let Ok(event) = self.result_rx.try_recv() {
            if self.in_flight.remove(&event.id).is_some() {
                events.push(event);
            } else {
                debug!("Dropping late result for cancelled request {}", event.id);
            }
        }
        events
    }

    fn wake(&self) {
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

impl HttpClient for ReqwestClient {
    fn start(&mut self, url: &str) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;

        let Some(runtime) = self.runtime.as_ref() else {
            warn!("HTTP runtime is shut down, failing {url}");
            self.cancelled.push_back(RequestEvent {
                id,
                state: RequestState::Failed,
                response: None,
            });
            return id;
        };

        debug!("Request {id} started: {url}");
        let client = self.client.clone();
        let url = url.to_string();
        let tx = self.result_tx.clone();
        let waker = self.waker.clone();

        let handle = runtime.spawn(async move {
            let (state, response) = fetch(&client, &url).await;
            if tx
                .send(RequestEvent {
                    id,
                    state,
                    response,
                })
                .is_ok()
            {
                if let Some(waker) = waker {
                    waker();
                }
            }
        });
        self.in_flight.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: RequestId) {
        match self.in_flight.remove(&id) {
            Some(handle) => {
                debug!("Request {id} cancelled");
                handle.abort();
                self.cancelled.push_back(RequestEvent::cancelled(id));
                self.wake();
            }
            None => debug!("Cancel for unknown or finished request {id}"),
        }
    }
}

impl Drop for ReqwestClient {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> (RequestState, Option<Response>) {
    let resp = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            debug!("Request to {url} failed: {e}");
            return (RequestState::Failed, None);
        }
    };

    let status = resp.status();
    let final_url = resp.url().to_string();
    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Reading body of {url} failed: {e}");
            return (RequestState::Failed, None);
        }
    };

    let response = Response {
        status: status.as_u16(),
        url: final_url,
        body,
    };
    (state_for_status(status), Some(response))
}

fn state_for_status(status: StatusCode) -> RequestState {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::PROXY_AUTHENTICATION_REQUIRED {
        RequestState::Unauthorized
    } else if status.is_success() {
        RequestState::Completed
    } else {
        RequestState::Failed
    }
}
