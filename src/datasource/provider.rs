use crate::domain::{DateWindow, Game, SeasonId, TenantId, Training};
use crate::error::CalResult;
use async_trait::async_trait;

/// The external data-access layer the pipeline reads from.
///
/// Implementations are owned by the embedding application (or by test
/// mocks); the pipeline only ever reads through this trait and never
/// mutates domain data.
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    /// Games of one tenant and season whose date falls in the window
    async fn games_in_window(
        &self,
        tenant: &TenantId,
        season: &SeasonId,
        window: &DateWindow,
    ) -> CalResult<Vec<Game>>;

    /// Trainings of one tenant and season whose date falls in the window
    async fn trainings_in_window(
        &self,
        tenant: &TenantId,
        season: &SeasonId,
        window: &DateWindow,
    ) -> CalResult<Vec<Training>>;
}
