//! Dashboard Controller
//!
//! Owns the observable dashboard state and sequences all backend traffic.
//! `load()` and `upload()` are the only operations with network side
//! effects; everything else is a pure read of the current state.
//!
//! State is replaced wholesale on every successful load cycle. On failure
//! the previous state is left untouched: a stale-but-valid display is
//! preferred over a blank dashboard on a transient backend hiccup.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

use crate::api::{ApiError, Backend, HistoryEnvelope, HistoryItem, Summary, UploadFile, UploadResult};

use super::events::DashboardEvent;

/// Trend label used when the backend supplies none
pub const TREND_UNKNOWN: &str = "Unknown";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Lifecycle phase of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Uploading,
    Error,
}

/// Observable dashboard state.
///
/// Summary, history, and trend always come from the same load cycle; the
/// controller never mixes responses from different cycles.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub summary: Option<Summary>,
    pub history: Vec<HistoryItem>,
    pub trend: String,
    pub pending_file: Option<UploadFile>,
    pub status: String,
    pub phase: Phase,
}

impl DashboardState {
    fn new() -> Self {
        Self {
            summary: None,
            history: Vec::new(),
            trend: TREND_UNKNOWN.to_string(),
            pending_file: None,
            status: "Ready".to_string(),
            phase: Phase::Idle,
        }
    }

    /// Number of active alerts; 0 when no summary has been loaded
    pub fn alert_count(&self) -> usize {
        self.summary.as_ref().map_or(0, |s| s.alerts.len())
    }

    /// Display emphasis only; never used for control flow
    pub fn has_alerts(&self) -> bool {
        self.alert_count() > 0
    }
}

/// Outcome of a `load()` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// State was replaced from a fresh load cycle
    Loaded,
    /// Another load was already in flight; this call was dropped
    Skipped,
}

/// Errors surfaced by controller operations
#[derive(Debug, Error)]
pub enum DashboardError {
    /// `upload()` was invoked with no file selected; no network call was made
    #[error("no file selected")]
    NoFileSelected,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Owns dashboard state and coordinates the summary/history refresh and the
/// upload workflow against a [`Backend`].
pub struct DashboardController {
    backend: Arc<dyn Backend>,
    state: RwLock<DashboardState>,
    events: broadcast::Sender<DashboardEvent>,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            state: RwLock::new(DashboardState::new()),
            events,
        }
    }

    /// Subscribe to controller notifications
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Refresh summary, history, and trend from the backend.
    ///
    /// Summary is fetched first, then history; both must succeed before the
    /// state is replaced, and the replacement is atomic. A failure leaves the
    /// previous state untouched, emits one [`DashboardEvent::LoadFailed`],
    /// and returns the error.
    ///
    /// A `load()` arriving while another is in flight is dropped and reports
    /// [`LoadOutcome::Skipped`].
    pub async fn load(&self) -> Result<LoadOutcome, DashboardError> {
        {
            let mut state = self.state.write().await;
            if state.phase == Phase::Loading {
                tracing::debug!("load already in flight, dropping duplicate call");
                return Ok(LoadOutcome::Skipped);
            }
            state.phase = Phase::Loading;
        }

        match self.fetch_cycle().await {
            Ok((summary, envelope)) => {
                {
                    let mut state = self.state.write().await;
                    state.summary = summary;
                    state.history = envelope.items;
                    state.trend = envelope
                        .trend
                        .unwrap_or_else(|| TREND_UNKNOWN.to_string());
                    state.phase = Phase::Ready;
                }
                tracing::info!("Dashboard refreshed");
                self.emit(DashboardEvent::Refreshed);
                Ok(LoadOutcome::Loaded)
            }
            Err(e) => {
                self.state.write().await.phase = Phase::Error;
                tracing::error!(error = %e, "Dashboard load failed");
                self.emit(DashboardEvent::LoadFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// One load cycle: summary, then history
    async fn fetch_cycle(&self) -> Result<(Option<Summary>, HistoryEnvelope), ApiError> {
        let summary = self.backend.fetch_summary().await?;
        let history = self.backend.fetch_history().await?;
        Ok((summary, history))
    }

    /// Select a file for the next upload
    pub async fn select_file(&self, file: UploadFile) {
        let mut state = self.state.write().await;
        state.status = format!("Selected {}", file.filename);
        state.pending_file = Some(file);
    }

    /// Discard the current file selection
    pub async fn clear_file(&self) {
        self.state.write().await.pending_file = None;
    }

    /// Upload the selected file and resynchronize from the backend.
    ///
    /// Rejects synchronously with [`DashboardError::NoFileSelected`] when
    /// nothing is selected. On success the selection is cleared and `load()`
    /// is invoked exactly once; the backend is the sole source of truth for
    /// post-upload state. On failure the selection is kept so the operator
    /// can retry, and the inline status carries the server's error text.
    pub async fn upload(&self) -> Result<UploadResult, DashboardError> {
        let file = {
            let mut state = self.state.write().await;
            let Some(file) = state.pending_file.clone() else {
                return Err(DashboardError::NoFileSelected);
            };
            state.phase = Phase::Uploading;
            state.status = format!("Uploading {}...", file.filename);
            file
        };

        match self.backend.upload_file(&file).await {
            Ok(result) => {
                {
                    let mut state = self.state.write().await;
                    state.pending_file = None;
                    state.status = result
                        .message
                        .clone()
                        .unwrap_or_else(|| "Upload successful".to_string());
                }
                tracing::info!(filename = %file.filename, "Upload accepted");
                self.emit(DashboardEvent::UploadSucceeded);

                // Resynchronize from the server. A reload failure surfaces
                // through the load path and does not retract the upload.
                let _ = self.load().await;

                Ok(result)
            }
            Err(e) => {
                let message = e.display_message("Upload failed");
                {
                    let mut state = self.state.write().await;
                    state.phase = Phase::Error;
                    state.status = message.clone();
                }
                tracing::error!(filename = %file.filename, error = %e, "Upload failed");
                self.emit(DashboardEvent::UploadFailed(message));
                Err(e.into())
            }
        }
    }

    fn emit(&self, event: DashboardEvent) {
        // No subscribers is fine; events are advisory
        let _ = self.events.send(event);
    }
}
