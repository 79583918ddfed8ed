// In crates/engine/src/dashboard.rs

use crate::Result;
use crate::poller::Source;
use api_client::Backend;
use async_trait::async_trait;
use core_types::DashboardStats;
use std::sync::Arc;

/// Portfolio stats for the dashboard. Failures keep the last stats on screen.
pub struct DashboardSource {
    backend: Arc<dyn Backend>,
}

impl DashboardSource {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Source for DashboardSource {
    type Snapshot = DashboardStats;

    fn name(&self) -> &'static str {
        "dashboard"
    }

    async fn fetch(&self) -> Result<DashboardStats> {
        Ok(self.backend.dashboard_stats().await?)
    }
}
