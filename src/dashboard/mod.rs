//! Dashboard Core
//!
//! State ownership, load/upload sequencing, and the notification channel.

mod controller;
mod events;

pub use controller::{
    DashboardController, DashboardError, DashboardState, LoadOutcome, Phase, TREND_UNKNOWN,
};
pub use events::DashboardEvent;
