//! Schedule command and query services.
//!
//! These services sit behind the driving ports and orchestrate the
//! repositories. Update and delete treat "missing" and "not yours" the
//! same way so a non-creator cannot probe for schedule existence.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    AvailabilityRepository, CandidatePayload, CandidateRepository, CommentRepository,
    CreateScheduleRequest, CreateScheduleResponse, DeleteScheduleRequest,
    GetScheduleDetailsRequest, GetScheduleDetailsResponse, GetScheduleForEditRequest,
    GetScheduleForEditResponse, RosterEntryPayload, ScheduleCommand, SchedulePayload,
    ScheduleQuery, ScheduleRepository, UpdateScheduleRequest, UpdateScheduleResponse,
};
use crate::domain::{
    Candidate, Error, Schedule, ScheduleName, UserId, parse_candidate_names,
};

fn schedule_not_found(schedule_id: &Uuid) -> Error {
    Error::not_found(format!("schedule {schedule_id} not found"))
}

fn schedule_payload(schedule: &Schedule) -> SchedulePayload {
    SchedulePayload {
        schedule_id: schedule.schedule_id,
        name: schedule.name.to_string(),
        memo: schedule.memo.clone(),
        created_by: schedule.created_by,
        updated_at: schedule.updated_at,
    }
}

fn candidate_payloads(candidates: &[Candidate]) -> Vec<CandidatePayload> {
    candidates
        .iter()
        .map(|candidate| CandidatePayload {
            candidate_id: candidate.candidate_id,
            candidate_name: candidate.candidate_name.clone(),
        })
        .collect()
}

/// Implements [`ScheduleCommand`] on top of the repositories.
pub struct ScheduleCommandService<S, C, A, M> {
    schedules: Arc<S>,
    candidates: Arc<C>,
    availabilities: Arc<A>,
    comments: Arc<M>,
}

impl<S, C, A, M> ScheduleCommandService<S, C, A, M>
where
    S: ScheduleRepository,
    C: CandidateRepository,
    A: AvailabilityRepository,
    M: CommentRepository,
{
    pub fn new(
        schedules: Arc<S>,
        candidates: Arc<C>,
        availabilities: Arc<A>,
        comments: Arc<M>,
    ) -> Self {
        Self {
            schedules,
            candidates,
            availabilities,
            comments,
        }
    }

    /// Fetch a schedule the requester created, collapsing both "missing"
    /// and "not the creator" into `not_found`.
    async fn owned_schedule(
        &self,
        schedule_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Schedule, Error> {
        match self.schedules.find(schedule_id).await? {
            Some(schedule) if schedule.is_created_by(user_id) => Ok(schedule),
            _ => Err(schedule_not_found(schedule_id)),
        }
    }
}

#[async_trait]
impl<S, C, A, M> ScheduleCommand for ScheduleCommandService<S, C, A, M>
where
    S: ScheduleRepository,
    C: CandidateRepository,
    A: AvailabilityRepository,
    M: CommentRepository,
{
    async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, Error> {
        let schedule = Schedule {
            schedule_id: Uuid::new_v4(),
            name: ScheduleName::coerce(&request.name),
            memo: request.memo,
            created_by: request.created_by,
            updated_at: Utc::now(),
        };
        self.schedules.create(&schedule).await?;

        let names = parse_candidate_names(&request.candidates);
        let inserted = self.candidates.add_all(&schedule.schedule_id, &names).await?;
        tracing::info!(
            schedule_id = %schedule.schedule_id,
            candidates = inserted.len(),
            "schedule created"
        );

        Ok(CreateScheduleResponse {
            schedule_id: schedule.schedule_id,
        })
    }

    async fn update_schedule(
        &self,
        request: UpdateScheduleRequest,
    ) -> Result<UpdateScheduleResponse, Error> {
        let mut schedule = self
            .owned_schedule(&request.schedule_id, &request.user_id)
            .await?;

        schedule.name = ScheduleName::coerce(&request.name);
        schedule.memo = request.memo;
        schedule.updated_at = Utc::now();
        self.schedules.update(&schedule).await?;

        let names = parse_candidate_names(&request.candidates);
        if !names.is_empty() {
            self.candidates.add_all(&schedule.schedule_id, &names).await?;
        }
        tracing::info!(
            schedule_id = %schedule.schedule_id,
            appended = names.len(),
            "schedule updated"
        );

        Ok(UpdateScheduleResponse {
            schedule_id: schedule.schedule_id,
        })
    }

    async fn delete_schedule(&self, request: DeleteScheduleRequest) -> Result<(), Error> {
        let schedule = self
            .owned_schedule(&request.schedule_id, &request.user_id)
            .await?;
        let schedule_id = schedule.schedule_id;

        // Comments are independent of the availability chain, so the two
        // branches run concurrently. Availabilities must go before their
        // candidates. The schedule row goes last so a partial failure
        // leaves it visible for a retry.
        let (removed_comments, (removed_availabilities, removed_candidates)) = tokio::try_join!(
            async {
                self.comments
                    .delete_for_schedule(&schedule_id)
                    .await
                    .map_err(Error::from)
            },
            async {
                let availabilities = self
                    .availabilities
                    .delete_for_schedule(&schedule_id)
                    .await
                    .map_err(Error::from)?;
                let candidates = self
                    .candidates
                    .delete_for_schedule(&schedule_id)
                    .await
                    .map_err(Error::from)?;
                Ok::<_, Error>((availabilities, candidates))
            }
        )?;

        self.schedules.delete(&schedule_id).await?;
        tracing::info!(
            %schedule_id,
            removed_comments,
            removed_availabilities,
            removed_candidates,
            "schedule deleted"
        );
        Ok(())
    }
}

/// Implements [`ScheduleQuery`] on top of the repositories.
pub struct ScheduleQueryService<S, C, A, M> {
    schedules: Arc<S>,
    candidates: Arc<C>,
    availabilities: Arc<A>,
    comments: Arc<M>,
}

impl<S, C, A, M> ScheduleQueryService<S, C, A, M>
where
    S: ScheduleRepository,
    C: CandidateRepository,
    A: AvailabilityRepository,
    M: CommentRepository,
{
    pub fn new(
        schedules: Arc<S>,
        candidates: Arc<C>,
        availabilities: Arc<A>,
        comments: Arc<M>,
    ) -> Self {
        Self {
            schedules,
            candidates,
            availabilities,
            comments,
        }
    }
}

#[async_trait]
impl<S, C, A, M> ScheduleQuery for ScheduleQueryService<S, C, A, M>
where
    S: ScheduleRepository,
    C: CandidateRepository,
    A: AvailabilityRepository,
    M: CommentRepository,
{
    async fn get_schedule_details(
        &self,
        request: GetScheduleDetailsRequest,
    ) -> Result<GetScheduleDetailsResponse, Error> {
        let schedule = self
            .schedules
            .find(&request.schedule_id)
            .await?
            .ok_or_else(|| schedule_not_found(&request.schedule_id))?;

        let candidates = self.candidates.list_for_schedule(&schedule.schedule_id).await?;
        let entries = self
            .availabilities
            .list_for_schedule(&schedule.schedule_id)
            .await?;
        let comments = self.comments.list_for_schedule(&schedule.schedule_id).await?;

        // Roster: the viewer first, then every respondent once, in the
        // repository's username order.
        let viewer = request.viewer;
        let mut seen: HashSet<UserId> = HashSet::from([viewer.id]);
        let mut users = vec![RosterEntryPayload {
            user: viewer,
            is_self: true,
        }];
        for entry in &entries {
            if seen.insert(entry.user.id) {
                users.push(RosterEntryPayload {
                    user: entry.user.clone(),
                    is_self: false,
                });
            }
        }

        // Full matrix: every (user, candidate) cell exists, defaulting to
        // absent, then recorded answers overwrite their cells.
        let mut availabilities: BTreeMap<String, BTreeMap<i32, i16>> = BTreeMap::new();
        for member in &users {
            let row = availabilities.entry(member.user.id.to_string()).or_default();
            for candidate in &candidates {
                row.insert(candidate.candidate_id, 0);
            }
        }
        for entry in &entries {
            if let Some(row) = availabilities.get_mut(&entry.user.id.to_string()) {
                row.insert(entry.candidate_id, entry.attendance.as_i16());
            }
        }

        let comments = comments
            .into_iter()
            .map(|comment| (comment.user_id.to_string(), comment.text.into()))
            .collect();

        Ok(GetScheduleDetailsResponse {
            schedule: schedule_payload(&schedule),
            candidates: candidate_payloads(&candidates),
            users,
            availabilities,
            comments,
        })
    }

    async fn get_schedule_for_edit(
        &self,
        request: GetScheduleForEditRequest,
    ) -> Result<GetScheduleForEditResponse, Error> {
        let schedule = match self.schedules.find(&request.schedule_id).await? {
            Some(schedule) if schedule.is_created_by(&request.user_id) => schedule,
            _ => return Err(schedule_not_found(&request.schedule_id)),
        };
        let candidates = self.candidates.list_for_schedule(&schedule.schedule_id).await?;

        Ok(GetScheduleForEditResponse {
            schedule: schedule_payload(&schedule),
            candidates: candidate_payloads(&candidates),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use mockall::predicate::always;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        InMemoryAvailabilityRepository, InMemoryCandidateRepository, InMemoryCommentRepository,
        InMemoryScheduleRepository, InMemoryUserRepository, MockScheduleRepository,
        ScheduleRepositoryError, UserRepository,
    };
    use crate::domain::{
        Attendance, Availability, Comment, CommentText, ErrorCode, SCHEDULE_NAME_MAX,
        UNTITLED_SCHEDULE_NAME, User, Username,
    };

    struct Harness {
        users: Arc<InMemoryUserRepository>,
        schedules: Arc<InMemoryScheduleRepository>,
        candidates: Arc<InMemoryCandidateRepository>,
        availabilities: Arc<InMemoryAvailabilityRepository>,
        comments: Arc<InMemoryCommentRepository>,
    }

    impl Harness {
        fn new() -> Self {
            let users = Arc::new(InMemoryUserRepository::new());
            Self {
                schedules: Arc::new(InMemoryScheduleRepository::new()),
                candidates: Arc::new(InMemoryCandidateRepository::new()),
                availabilities: Arc::new(InMemoryAvailabilityRepository::new(Arc::clone(&users))),
                comments: Arc::new(InMemoryCommentRepository::new()),
                users,
            }
        }

        fn command(
            &self,
        ) -> ScheduleCommandService<
            InMemoryScheduleRepository,
            InMemoryCandidateRepository,
            InMemoryAvailabilityRepository,
            InMemoryCommentRepository,
        > {
            ScheduleCommandService::new(
                Arc::clone(&self.schedules),
                Arc::clone(&self.candidates),
                Arc::clone(&self.availabilities),
                Arc::clone(&self.comments),
            )
        }

        fn query(
            &self,
        ) -> ScheduleQueryService<
            InMemoryScheduleRepository,
            InMemoryCandidateRepository,
            InMemoryAvailabilityRepository,
            InMemoryCommentRepository,
        > {
            ScheduleQueryService::new(
                Arc::clone(&self.schedules),
                Arc::clone(&self.candidates),
                Arc::clone(&self.availabilities),
                Arc::clone(&self.comments),
            )
        }

        async fn seeded_user(&self, name: &str) -> User {
            let user = User::new(UserId::random(), Username::new(name).expect("valid"));
            self.users.save(&user).await.expect("save succeeds");
            user
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_parses_candidates_and_coerces_the_name() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;

        let response = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "n".repeat(SCHEDULE_NAME_MAX + 5),
                memo: "memo".to_owned(),
                candidates: "  mon \n\n tue \n".to_owned(),
            })
            .await
            .expect("create succeeds");

        let stored = harness
            .schedules
            .find(&response.schedule_id)
            .await
            .expect("find succeeds")
            .expect("row exists");
        assert_eq!(stored.name.as_ref().chars().count(), SCHEDULE_NAME_MAX);

        let candidates = harness
            .candidates
            .list_for_schedule(&response.schedule_id)
            .await
            .expect("list succeeds");
        let names: Vec<&str> = candidates.iter().map(|c| c.candidate_name.as_str()).collect();
        assert_eq!(names, vec!["mon", "tue"]);
    }

    #[rstest]
    #[tokio::test]
    async fn create_with_an_empty_name_stores_the_placeholder() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;

        let response = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: String::new(),
                memo: String::new(),
                candidates: String::new(),
            })
            .await
            .expect("create succeeds");

        let stored = harness
            .schedules
            .find(&response.schedule_id)
            .await
            .expect("find succeeds")
            .expect("row exists");
        assert_eq!(stored.name.as_ref(), UNTITLED_SCHEDULE_NAME);
    }

    #[rstest]
    #[tokio::test]
    async fn update_by_a_non_creator_reports_not_found() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;
        let intruder = harness.seeded_user("bob").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon".to_owned(),
            })
            .await
            .expect("create succeeds");

        let error = harness
            .command()
            .update_schedule(UpdateScheduleRequest {
                schedule_id: created.schedule_id,
                user_id: intruder.id,
                name: "hijacked".to_owned(),
                memo: String::new(),
                candidates: String::new(),
            })
            .await
            .expect_err("update rejected");
        assert_eq!(error.code(), ErrorCode::NotFound);

        let stored = harness
            .schedules
            .find(&created.schedule_id)
            .await
            .expect("find succeeds")
            .expect("row exists");
        assert_eq!(stored.name.as_ref(), "lunch");
    }

    #[rstest]
    #[tokio::test]
    async fn update_appends_candidates_without_touching_existing_rows() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon\ntue".to_owned(),
            })
            .await
            .expect("create succeeds");

        harness
            .command()
            .update_schedule(UpdateScheduleRequest {
                schedule_id: created.schedule_id,
                user_id: creator.id,
                name: "dinner".to_owned(),
                memo: "updated".to_owned(),
                candidates: "wed".to_owned(),
            })
            .await
            .expect("update succeeds");

        let candidates = harness
            .candidates
            .list_for_schedule(&created.schedule_id)
            .await
            .expect("list succeeds");
        let names: Vec<&str> = candidates.iter().map(|c| c.candidate_name.as_str()).collect();
        assert_eq!(names, vec!["mon", "tue", "wed"]);

        let stored = harness
            .schedules
            .find(&created.schedule_id)
            .await
            .expect("find succeeds")
            .expect("row exists");
        assert_eq!(stored.name.as_ref(), "dinner");
        assert_eq!(stored.memo, "updated");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_cascades_to_candidates_availabilities_and_comments() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon".to_owned(),
            })
            .await
            .expect("create succeeds");
        let schedule_id = created.schedule_id;

        harness
            .availabilities
            .upsert(&Availability {
                schedule_id,
                user_id: creator.id,
                candidate_id: 1,
                attendance: Attendance::Attending,
            })
            .await
            .expect("upsert succeeds");
        harness
            .comments
            .upsert(&Comment {
                schedule_id,
                user_id: creator.id,
                text: CommentText::coerce("see you there"),
            })
            .await
            .expect("upsert succeeds");

        harness
            .command()
            .delete_schedule(DeleteScheduleRequest {
                schedule_id,
                user_id: creator.id,
            })
            .await
            .expect("delete succeeds");

        assert_eq!(
            harness
                .schedules
                .find(&schedule_id)
                .await
                .expect("find succeeds"),
            None
        );
        assert!(harness
            .candidates
            .list_for_schedule(&schedule_id)
            .await
            .expect("list succeeds")
            .is_empty());
        assert!(harness
            .availabilities
            .list_for_schedule(&schedule_id)
            .await
            .expect("list succeeds")
            .is_empty());
        assert!(harness
            .comments
            .list_for_schedule(&schedule_id)
            .await
            .expect("list succeeds")
            .is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_a_non_creator_reports_not_found() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;
        let intruder = harness.seeded_user("bob").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: String::new(),
            })
            .await
            .expect("create succeeds");

        let error = harness
            .command()
            .delete_schedule(DeleteScheduleRequest {
                schedule_id: created.schedule_id,
                user_id: intruder.id,
            })
            .await
            .expect_err("delete rejected");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_connection_failures_surface_as_service_unavailable() {
        let mut schedules = MockScheduleRepository::new();
        schedules
            .expect_find()
            .with(always())
            .returning(|_| Err(ScheduleRepositoryError::connection("pool exhausted")));
        let users = Arc::new(InMemoryUserRepository::new());
        let service = ScheduleCommandService::new(
            Arc::new(schedules),
            Arc::new(InMemoryCandidateRepository::new()),
            Arc::new(InMemoryAvailabilityRepository::new(users)),
            Arc::new(InMemoryCommentRepository::new()),
        );

        let error = service
            .delete_schedule(DeleteScheduleRequest {
                schedule_id: Uuid::new_v4(),
                user_id: UserId::random(),
            })
            .await
            .expect_err("delete fails");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn details_report_not_found_for_missing_schedules() {
        let harness = Harness::new();
        let viewer = harness.seeded_user("alice").await;

        let error = harness
            .query()
            .get_schedule_details(GetScheduleDetailsRequest {
                schedule_id: Uuid::new_v4(),
                viewer,
            })
            .await
            .expect_err("details rejected");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn details_put_the_viewer_first_and_deduplicate_respondents() {
        let harness = Harness::new();
        let creator = harness.seeded_user("carol").await;
        let viewer = harness.seeded_user("alice").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon\ntue".to_owned(),
            })
            .await
            .expect("create succeeds");

        for candidate_id in [1, 2] {
            harness
                .availabilities
                .upsert(&Availability {
                    schedule_id: created.schedule_id,
                    user_id: creator.id,
                    candidate_id,
                    attendance: Attendance::Attending,
                })
                .await
                .expect("upsert succeeds");
        }
        harness
            .availabilities
            .upsert(&Availability {
                schedule_id: created.schedule_id,
                user_id: viewer.id,
                candidate_id: 1,
                attendance: Attendance::Undecided,
            })
            .await
            .expect("upsert succeeds");

        let details = harness
            .query()
            .get_schedule_details(GetScheduleDetailsRequest {
                schedule_id: created.schedule_id,
                viewer: viewer.clone(),
            })
            .await
            .expect("details succeed");

        let roster: Vec<(String, bool)> = details
            .users
            .iter()
            .map(|entry| (entry.user.username.to_string(), entry.is_self))
            .collect();
        assert_eq!(
            roster,
            vec![("alice".to_owned(), true), ("carol".to_owned(), false)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn details_fill_unanswered_cells_with_zero() {
        let harness = Harness::new();
        let viewer = harness.seeded_user("alice").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: viewer.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon\ntue".to_owned(),
            })
            .await
            .expect("create succeeds");

        harness
            .availabilities
            .upsert(&Availability {
                schedule_id: created.schedule_id,
                user_id: viewer.id,
                candidate_id: 2,
                attendance: Attendance::Attending,
            })
            .await
            .expect("upsert succeeds");

        let details = harness
            .query()
            .get_schedule_details(GetScheduleDetailsRequest {
                schedule_id: created.schedule_id,
                viewer: viewer.clone(),
            })
            .await
            .expect("details succeed");

        let row = details
            .availabilities
            .get(&viewer.id.to_string())
            .expect("viewer row exists");
        assert_eq!(row.get(&1), Some(&0));
        assert_eq!(row.get(&2), Some(&2));
    }

    #[rstest]
    #[tokio::test]
    async fn details_map_comments_by_user() {
        let harness = Harness::new();
        let viewer = harness.seeded_user("alice").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: viewer.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon".to_owned(),
            })
            .await
            .expect("create succeeds");

        harness
            .comments
            .upsert(&Comment {
                schedule_id: created.schedule_id,
                user_id: viewer.id,
                text: CommentText::coerce("running late"),
            })
            .await
            .expect("upsert succeeds");

        let details = harness
            .query()
            .get_schedule_details(GetScheduleDetailsRequest {
                schedule_id: created.schedule_id,
                viewer: viewer.clone(),
            })
            .await
            .expect("details succeed");

        assert_eq!(
            details.comments.get(&viewer.id.to_string()),
            Some(&"running late".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn edit_projection_is_creator_only() {
        let harness = Harness::new();
        let creator = harness.seeded_user("alice").await;
        let intruder = harness.seeded_user("bob").await;

        let created = harness
            .command()
            .create_schedule(CreateScheduleRequest {
                created_by: creator.id,
                name: "lunch".to_owned(),
                memo: String::new(),
                candidates: "mon\ntue".to_owned(),
            })
            .await
            .expect("create succeeds");

        let projection = harness
            .query()
            .get_schedule_for_edit(GetScheduleForEditRequest {
                schedule_id: created.schedule_id,
                user_id: creator.id,
            })
            .await
            .expect("creator may edit");
        assert_eq!(projection.candidates.len(), 2);

        let error = harness
            .query()
            .get_schedule_for_edit(GetScheduleForEditRequest {
                schedule_id: created.schedule_id,
                user_id: intruder.id,
            })
            .await
            .expect_err("non-creator rejected");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
