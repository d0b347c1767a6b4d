//! Report delivery.
//!
//! The preferred path is a beacon: the payload goes onto a local queue and a
//! background [`DeliveryWorker`] posts it, so delivery outlives whatever
//! queued it. When no beacon is available the payload is posted on a
//! spawned task tracked by [`InFlightPosts`]. Either way the caller never
//! waits and never hears about failures.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use heartline_journey::application::dispatch::{ReportDispatch, ReportPayload};
use reqwest::Client;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::TransportError;

/// Posts reports as JSON to the report endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Creates a transport for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Posts one report and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when the request fails or the server answers
    /// with a non-success status.
    pub async fn post(&self, payload: &ReportPayload) -> Result<(), TransportError> {
        let response = self.client.post(&self.url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status()));
        }

        Ok(())
    }

    /// Posts one report on a spawned task. Must be called inside a Tokio
    /// runtime.
    pub fn spawn_post(&self, payload: ReportPayload) -> JoinHandle<()> {
        let transport = self.clone();
        tokio::spawn(async move {
            match transport.post(&payload).await {
                Ok(()) => debug!("report delivered"),
                Err(e) => debug!(error = %e, "report delivery failed"),
            }
        })
    }
}

/// Direct posts still running. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlightPosts {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl InFlightPosts {
    fn track(&self, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Number of posts not yet finished.
    #[must_use]
    pub fn len(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Whether every tracked post has finished.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Waits up to `grace` for the tracked posts, aborting whatever is left.
    /// Returns whether they all finished in time.
    pub async fn flush(&self, grace: Duration) -> bool {
        let mut pending =
            std::mem::take(&mut *self.handles.lock().unwrap_or_else(PoisonError::into_inner));
        let finished = tokio::time::timeout(grace, async {
            for handle in &mut pending {
                let _ = handle.await;
            }
        })
        .await
        .is_ok();

        if !finished {
            for handle in &pending {
                handle.abort();
            }
            warn!(?grace, "direct report post did not finish before exit");
        }
        finished
    }
}

/// Queues reports for the delivery worker.
#[derive(Debug, Clone)]
pub struct BeaconTransport {
    queue: UnboundedSender<ReportPayload>,
}

impl BeaconTransport {
    /// Queues a report. Returns `false` if the worker is gone and the
    /// report was not queued.
    #[must_use]
    pub fn send_beacon(&self, payload: ReportPayload) -> bool {
        self.queue.send(payload).is_ok()
    }
}

/// Background task that drains the beacon queue.
#[derive(Debug)]
pub struct DeliveryWorker {
    handle: JoinHandle<()>,
}

impl DeliveryWorker {
    /// Starts a worker posting through `transport` and returns the beacon
    /// that feeds it. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn spawn(transport: HttpTransport) -> (BeaconTransport, Self) {
        let (queue, mut queued) = mpsc::unbounded_channel::<ReportPayload>();
        let handle = tokio::spawn(async move {
            while let Some(payload) = queued.recv().await {
                match transport.post(&payload).await {
                    Ok(()) => debug!("report delivered"),
                    Err(e) => debug!(error = %e, "report delivery failed"),
                }
            }
        });
        (BeaconTransport { queue }, Self { handle })
    }

    /// Waits up to `grace` for queued reports to go out, then stops the
    /// worker. The queue only ends once every [`BeaconTransport`] clone is
    /// dropped. Returns whether the queue drained in time.
    pub async fn flush(self, grace: Duration) -> bool {
        let mut handle = self.handle;
        if tokio::time::timeout(grace, &mut handle).await.is_ok() {
            true
        } else {
            handle.abort();
            warn!(?grace, "report delivery did not finish before exit");
            false
        }
    }
}

/// Dispatches reports through the beacon when there is one, falling back to
/// a direct HTTP post.
#[derive(Debug, Clone)]
pub struct ReportDispatcher {
    beacon: Option<BeaconTransport>,
    fallback: HttpTransport,
    in_flight: InFlightPosts,
}

impl ReportDispatcher {
    /// Creates a dispatcher.
    #[must_use]
    pub fn new(beacon: Option<BeaconTransport>, fallback: HttpTransport) -> Self {
        Self {
            beacon,
            fallback,
            in_flight: InFlightPosts::default(),
        }
    }

    /// Handle on the direct posts this dispatcher has started. It stays
    /// usable after the dispatcher, and its beacon, are dropped.
    #[must_use]
    pub fn in_flight(&self) -> InFlightPosts {
        self.in_flight.clone()
    }
}

impl ReportDispatch for ReportDispatcher {
    fn dispatch(&self, payload: ReportPayload) {
        if let Some(beacon) = &self.beacon {
            if beacon.send_beacon(payload.clone()) {
                debug!("report queued");
                return;
            }
            debug!("beacon unavailable, posting directly");
        }
        self.in_flight.track(self.fallback.spawn_post(payload));
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::{TimeZone, Utc};
    use heartline_journey::domain::scene::{AnswerKey, Answers, Decision};
    use serde_json::Value;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    async fn capture(State(tx): State<UnboundedSender<Value>>, Json(body): Json<Value>) -> Json<Value> {
        let _ = tx.send(body);
        Json(serde_json::json!({ "ok": true }))
    }

    async fn reject() -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    async fn stall() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(30)).await;
        StatusCode::OK
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn capture_server() -> (String, UnboundedReceiver<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new()
            .route("/api/report", post(capture))
            .with_state(tx);
        let addr = serve(app).await;
        (format!("http://{addr}/api/report"), rx)
    }

    fn payload() -> ReportPayload {
        let mut answers = Answers::default();
        answers.set(AnswerKey::Q2, "Home".to_string());
        answers.decision = Some(Decision::Yes);
        ReportPayload::new(answers, Utc.with_ymd_and_hms(2026, 2, 14, 21, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_post_sends_flattened_json() {
        // Arrange
        let (url, mut received) = capture_server().await;
        let transport = HttpTransport::new(url);

        // Act
        transport.post(&payload()).await.unwrap();

        // Assert
        let body = received.recv().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "q2": "Home",
                "decision": "yes",
                "timestamp": "2026-02-14T21:00:00.000Z",
            })
        );
    }

    #[tokio::test]
    async fn test_post_reports_non_success_status() {
        let addr = serve(Router::new().route("/api/report", post(reject))).await;
        let transport = HttpTransport::new(format!("http://{addr}/api/report"));

        let result = transport.post(&payload()).await;

        assert!(matches!(
            result,
            Err(TransportError::HttpStatus(status)) if status == reqwest::StatusCode::BAD_REQUEST
        ));
    }

    #[tokio::test]
    async fn test_post_reports_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let transport = HttpTransport::new(format!("http://{addr}/api/report"));

        let result = transport.post(&payload()).await;

        assert!(matches!(result, Err(TransportError::Http(_))));
    }

    #[tokio::test]
    async fn test_beacon_is_delivered_by_worker() {
        // Arrange
        let (url, mut received) = capture_server().await;
        let (beacon, worker) = DeliveryWorker::spawn(HttpTransport::new(url));

        // Act
        assert!(beacon.send_beacon(payload()));
        drop(beacon);

        // Assert
        assert!(worker.flush(WAIT).await);
        let body = received.try_recv().unwrap();
        assert_eq!(body["decision"], "yes");
    }

    #[tokio::test]
    async fn test_flush_gives_up_after_grace() {
        let addr = serve(Router::new().route("/api/report", post(stall))).await;
        let (beacon, worker) =
            DeliveryWorker::spawn(HttpTransport::new(format!("http://{addr}/api/report")));
        assert!(beacon.send_beacon(payload()));
        drop(beacon);

        let drained = worker.flush(Duration::from_millis(100)).await;

        assert!(!drained);
    }

    #[tokio::test]
    async fn test_send_beacon_fails_once_worker_is_gone() {
        let (queue, queued) = mpsc::unbounded_channel();
        drop(queued);
        let beacon = BeaconTransport { queue };

        assert!(!beacon.send_beacon(payload()));
    }

    #[tokio::test]
    async fn test_dispatcher_prefers_beacon() {
        let (url, mut received) = capture_server().await;
        let (queue, mut queued) = mpsc::unbounded_channel();
        let dispatcher = ReportDispatcher::new(Some(BeaconTransport { queue }), HttpTransport::new(url));

        dispatcher.dispatch(payload());

        assert_eq!(queued.try_recv().unwrap(), payload());
        let nothing_posted = tokio::time::timeout(Duration::from_millis(200), received.recv()).await;
        assert!(nothing_posted.is_err());
    }

    #[tokio::test]
    async fn test_dispatcher_falls_back_to_http_without_beacon() {
        let (url, mut received) = capture_server().await;
        let dispatcher = ReportDispatcher::new(None, HttpTransport::new(url));

        dispatcher.dispatch(payload());

        let body = tokio::time::timeout(WAIT, received.recv()).await.unwrap().unwrap();
        assert_eq!(body["q2"], "Home");
    }

    #[tokio::test]
    async fn test_in_flight_flush_waits_for_direct_post() {
        // Arrange
        let (url, mut received) = capture_server().await;
        let dispatcher = ReportDispatcher::new(None, HttpTransport::new(url));
        let in_flight = dispatcher.in_flight();

        // Act
        dispatcher.dispatch(payload());
        drop(dispatcher);
        let finished = in_flight.flush(WAIT).await;

        // Assert
        assert!(finished);
        assert!(in_flight.is_empty());
        let body = received.try_recv().unwrap();
        assert_eq!(body["decision"], "yes");
    }

    #[tokio::test]
    async fn test_in_flight_flush_aborts_after_grace() {
        let addr = serve(Router::new().route("/api/report", post(stall))).await;
        let dispatcher =
            ReportDispatcher::new(None, HttpTransport::new(format!("http://{addr}/api/report")));
        let in_flight = dispatcher.in_flight();
        dispatcher.dispatch(payload());

        let finished = in_flight.flush(Duration::from_millis(100)).await;

        assert!(!finished);
        assert!(in_flight.is_empty());
    }

    #[tokio::test]
    async fn test_dispatcher_falls_back_when_beacon_is_closed() {
        let (url, mut received) = capture_server().await;
        let (queue, queued) = mpsc::unbounded_channel();
        drop(queued);
        let dispatcher = ReportDispatcher::new(Some(BeaconTransport { queue }), HttpTransport::new(url));

        dispatcher.dispatch(payload());

        let body = tokio::time::timeout(WAIT, received.recv()).await.unwrap().unwrap();
        assert_eq!(body["decision"], "yes");
    }

    #[tokio::test]
    async fn test_dispatch_swallows_delivery_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let (beacon, worker) =
            DeliveryWorker::spawn(HttpTransport::new(format!("http://{addr}/api/report")));
        let dispatcher = ReportDispatcher::new(Some(beacon), HttpTransport::new("http://127.0.0.1:9"));

        dispatcher.dispatch(payload());
        drop(dispatcher);

        assert!(worker.flush(WAIT).await);
    }
}
