//! Availability command service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AvailabilityCommand, AvailabilityRepository, UpdateAvailabilityRequest,
    UpdateAvailabilityResponse,
};
use crate::domain::{Availability, Error};

/// Implements [`AvailabilityCommand`] on top of the repository.
pub struct AvailabilityService<A> {
    availabilities: Arc<A>,
}

impl<A> AvailabilityService<A>
where
    A: AvailabilityRepository,
{
    pub fn new(availabilities: Arc<A>) -> Self {
        Self { availabilities }
    }
}

#[async_trait]
impl<A> AvailabilityCommand for AvailabilityService<A>
where
    A: AvailabilityRepository,
{
    async fn update_availability(
        &self,
        request: UpdateAvailabilityRequest,
    ) -> Result<UpdateAvailabilityResponse, Error> {
        let availability = Availability {
            schedule_id: request.schedule_id,
            user_id: request.user_id,
            candidate_id: request.candidate_id,
            attendance: request.attendance,
        };
        self.availabilities.upsert(&availability).await?;
        tracing::debug!(
            schedule_id = %availability.schedule_id,
            candidate_id = availability.candidate_id,
            attendance = availability.attendance.as_i16(),
            "availability recorded"
        );

        Ok(UpdateAvailabilityResponse {
            status: "OK".to_owned(),
            availability: availability.attendance.as_i16(),
        })
    }
}
