//! Atomic click accounting.

use std::sync::Arc;

use metrics::counter;
use tracing::debug;

use crate::domain::deadline::Deadline;
use crate::domain::entities::{Visit, VisitMetadata};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// Records one visit per successful resolution.
///
/// Delegates the increment-and-insert unit to [`VisitRepository::record_visit`]
/// under the caller's deadline. If the deadline fires mid-transaction the
/// transaction is dropped and rolled back, so the counter and the visit rows
/// never disagree.
pub struct VisitRecorder<V: VisitRepository> {
    visit_repository: Arc<V>,
}

impl<V: VisitRepository> VisitRecorder<V> {
    pub fn new(visit_repository: Arc<V>) -> Self {
        Self { visit_repository }
    }

    /// Increments the link's click count and appends a visit row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link vanished, or a store/deadline
    /// error. Nothing is applied in any error case.
    pub async fn record(
        &self,
        link_id: i64,
        metadata: VisitMetadata,
        deadline: &Deadline,
    ) -> Result<Visit, AppError> {
        let result = deadline
            .run(self.visit_repository.record_visit(link_id, metadata))
            .await;

        match &result {
            Ok(visit) => {
                counter!("shortener_visits_recorded_total").increment(1);
                debug!(link_id, visit_id = visit.id, "visit recorded");
            }
            Err(e) => {
                counter!("shortener_visits_failed_total").increment(1);
                debug!(link_id, error = %e, "visit not recorded");
            }
        }

        result
    }
}
