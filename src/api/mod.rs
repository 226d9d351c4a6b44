//! Backend API Layer
//!
//! Authenticated request client for the equipment analytics backend plus the
//! wire types it decodes. The [`Backend`] trait is the seam between the
//! dashboard controller and the network: production code uses [`ApiClient`],
//! tests substitute a scripted fake.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{
    Alert, HealthScore, HistoryEnvelope, HistoryItem, Summary, UploadFile, UploadResult,
};

use async_trait::async_trait;

/// The three backend operations the dashboard controller depends on.
///
/// Implementations must present a uniform success/failure contract: transport
/// failures, non-success statuses, and undecodable bodies all surface as
/// distinct [`ApiError`] kinds.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the latest summary. `None` when the backend holds no dataset.
    async fn fetch_summary(&self) -> Result<Option<Summary>, ApiError>;

    /// Fetch upload history, normalized from either historical wire shape.
    async fn fetch_history(&self) -> Result<HistoryEnvelope, ApiError>;

    /// Upload a measurement file as the multipart field `file`.
    async fn upload_file(&self, file: &UploadFile) -> Result<UploadResult, ApiError>;
}
