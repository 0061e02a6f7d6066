//! Sample task sets for demos and smoke runs.

use mockable::Clock;

use crate::sync::domain::{TaskDomainError, TaskId, TaskPriority, TaskRecord, TaskStatus};

/// Returns the three sample source tasks, stamped with the current time.
///
/// # Errors
///
/// Returns [`TaskDomainError`] if a sample record fails validation.
pub fn sample_source_tasks(clock: &impl Clock) -> Result<Vec<TaskRecord>, TaskDomainError> {
    Ok(vec![
        TaskRecord::new(TaskId::new("src-1")?, "Implement authentication", clock)?
            .with_description("Add OAuth2 authentication to the API")
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::High),
        TaskRecord::new(TaskId::new("src-2")?, "Write documentation", clock)?
            .with_description("Document all API endpoints")
            .with_status(TaskStatus::Todo)
            .with_priority(TaskPriority::Medium),
        TaskRecord::new(TaskId::new("src-3")?, "Fix bug in sync engine", clock)?
            .with_description("Resolve memory leak issue")
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::High),
    ])
}

/// Returns the two sample destination tasks, stamped with the current time.
///
/// # Errors
///
/// Returns [`TaskDomainError`] if a sample record fails validation.
pub fn sample_destination_tasks(clock: &impl Clock) -> Result<Vec<TaskRecord>, TaskDomainError> {
    Ok(vec![
        TaskRecord::new(TaskId::new("dest-1")?, "Setup CI/CD pipeline", clock)?
            .with_description("Configure GitHub Actions")
            .with_status(TaskStatus::Done)
            .with_priority(TaskPriority::Medium),
        TaskRecord::new(TaskId::new("dest-2")?, "Write unit tests", clock)?
            .with_description("Add tests for sync engine")
            .with_status(TaskStatus::Todo)
            .with_priority(TaskPriority::High),
    ])
}
