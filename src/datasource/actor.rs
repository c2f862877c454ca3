use super::cache::{CachedMonth, MonthKey};
use super::provider::ScheduleProvider;
use crate::calendar::model::CalendarEvent;
use crate::calendar::transform::{sort_events, transform};
use crate::config::Config;
use crate::domain::TenantContext;
use crate::error::{datasource_error, CalResult};
use futures::future;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

/// The schedule actor that processes messages
pub struct ScheduleActor {
    config: Arc<RwLock<Config>>,
    ctx: TenantContext,
    provider: Arc<dyn ScheduleProvider>,
    cache: HashMap<MonthKey, CachedMonth>,
    command_rx: mpsc::Receiver<ScheduleCommand>,
    // Own sender, used to enqueue prefetches behind the current command
    self_tx: mpsc::Sender<ScheduleCommand>,
}

/// Commands that can be sent to the schedule actor
pub enum ScheduleCommand {
    MonthEvents(MonthKey, mpsc::Sender<CalResult<Vec<CalendarEvent>>>),
    Prefetch(MonthKey),
    Invalidate(MonthKey, mpsc::Sender<CalResult<()>>),
    Shutdown,
}

/// Handle for communicating with the schedule actor
#[derive(Clone)]
pub struct ScheduleActorHandle {
    command_tx: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleActorHandle {
    /// Get the transformed events of one month, from cache when fresh
    pub async fn month_events(&self, key: MonthKey) -> CalResult<Vec<CalendarEvent>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::MonthEvents(key, response_tx))
            .await
            .map_err(|e| datasource_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| datasource_error("Response channel closed"))?
    }

    /// Drop one cached month so the next request refetches it
    pub async fn invalidate(&self, key: MonthKey) -> CalResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::Invalidate(key, response_tx))
            .await
            .map_err(|e| datasource_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| datasource_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> CalResult<()> {
        let _ = self.command_tx.send(ScheduleCommand::Shutdown).await;
        Ok(())
    }
}

impl ScheduleActor {
    /// Create a new actor and return its handle
    pub fn new(
        config: Arc<RwLock<Config>>,
        ctx: TenantContext,
        provider: Arc<dyn ScheduleProvider>,
    ) -> (Self, ScheduleActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            ctx,
            provider,
            cache: HashMap::new(),
            command_rx,
            self_tx: command_tx.clone(),
        };

        let handle = ScheduleActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Schedule actor started for tenant {}", self.ctx.tenant_id);

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                ScheduleCommand::MonthEvents(key, response_tx) => {
                    let result = self.month_events(key).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::Prefetch(key) => {
                    self.prefetch(key).await;
                }
                ScheduleCommand::Invalidate(key, response_tx) => {
                    self.cache.remove(&key);
                    debug!("Invalidated cache entry {}", key);
                    let _ = response_tx.send(Ok(())).await;
                }
                ScheduleCommand::Shutdown => {
                    info!("Schedule actor shutting down");
                    break;
                }
            }
        }

        info!("Schedule actor shut down");
    }

    /// Serve one month, refetching when the cached entry went stale.
    /// A successful fetch enqueues a prefetch of the following month so
    /// forward navigation stays latency-free on the common path.
    async fn month_events(&mut self, key: MonthKey) -> CalResult<Vec<CalendarEvent>> {
        let ttl = { self.config.read().await.prefetch_ttl() };

        if let Some(entry) = self.cache.get(&key) {
            if entry.is_fresh(ttl) {
                debug!("Cache hit for {}", key);
                return Ok(entry.events.clone());
            }
        }

        let events = self.fetch_month(&key).await?;
        let _ = self
            .self_tx
            .try_send(ScheduleCommand::Prefetch(key.next_month()));

        Ok(events)
    }

    /// Fetch, transform, and cache one month
    async fn fetch_month(&mut self, key: &MonthKey) -> CalResult<Vec<CalendarEvent>> {
        let window = key.window();
        info!("Fetching schedule for {}", key);

        let (games, trainings) = future::try_join(
            self.provider.games_in_window(&key.tenant, &key.season, &window),
            self.provider
                .trainings_in_window(&key.tenant, &key.season, &window),
        )
        .await?;

        let config = { self.config.read().await.clone() };
        let mut events = transform(&games, &trainings, &self.ctx, &config);
        sort_events(&mut events);

        self.cache
            .insert(key.clone(), CachedMonth::new(events.clone()));

        Ok(events)
    }

    /// Warm the cache for a month nobody asked for yet. Best effort:
    /// a failed prefetch is logged and retried on demand later.
    async fn prefetch(&mut self, key: MonthKey) {
        let ttl = { self.config.read().await.prefetch_ttl() };
        if self.cache.get(&key).is_some_and(|entry| entry.is_fresh(ttl)) {
            return;
        }

        debug!("Prefetching {}", key);
        if let Err(e) = self.fetch_month(&key).await {
            warn!("Prefetch of {} failed: {}", key, e);
        }
    }
}
