use super::actor::{ScheduleActor, ScheduleActorHandle};
use super::cache::MonthKey;
use super::provider::ScheduleProvider;
use crate::calendar::model::CalendarEvent;
use crate::config::Config;
use crate::domain::TenantContext;
use crate::error::CalResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the schedule data source
#[derive(Clone)]
pub struct ScheduleHandle {
    actor_handle: ScheduleActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Create a new ScheduleHandle and spawn the actor
    pub fn new(
        config: Arc<RwLock<Config>>,
        ctx: TenantContext,
        provider: Arc<dyn ScheduleProvider>,
    ) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = ScheduleActor::new(config, ctx, provider);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get the transformed events of one month
    pub async fn month_events(&self, key: MonthKey) -> CalResult<Vec<CalendarEvent>> {
        self.actor_handle.month_events(key).await
    }

    /// Drop one cached month
    pub async fn invalidate(&self, key: MonthKey) -> CalResult<()> {
        self.actor_handle.invalidate(key).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalResult<()> {
        self.actor_handle.shutdown().await
    }
}
