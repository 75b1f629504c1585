//! Ticket Model
//!
//! The ticket entity and its classifications, owned by the Project
//! aggregate. Mutation rules live in [`crate::transition`]; persistence
//! is the external store's concern.

use crate::status::TicketStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ticket priority classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
	Low,
	Medium,
	High,
	Urgent,
}

/// Ticket type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketKind {
	Feature,
	Bug,
	Task,
	Improvement,
	Documentation,
}

/// A ticket on a project board.
///
/// Created by a reporter, mutated by anyone holding ticket-edit in the
/// owning project, never hard-deleted by ordinary roles. `completed_at`
/// is stamped by the first transition into DONE and then left alone.
///
/// # Examples
///
/// ```
/// use synchro_workflow::{Ticket, TicketPriority, TicketStatus};
/// use uuid::Uuid;
///
/// let ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 7, "SYN-7", "Fix login redirect");
/// assert_eq!(ticket.status, TicketStatus::Backlog);
/// assert_eq!(ticket.priority, TicketPriority::Medium);
/// assert!(ticket.completed_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
	pub id: Uuid,
	pub project_id: Uuid,
	/// Sequential number within the project.
	pub number: u32,
	/// Human-facing key, `<project key>-<number>`.
	pub key: String,
	pub title: String,
	pub description: Option<String>,
	pub kind: TicketKind,
	pub priority: TicketPriority,
	pub status: TicketStatus,
	pub reporter_id: Uuid,
	pub assignee_id: Option<Uuid>,
	pub story_points: Option<u32>,
	pub estimated_hours: Option<f64>,
	pub logged_hours: f64,
	/// Completion percentage, 0-100.
	pub progress: u8,
	pub due_date: Option<DateTime<Utc>>,
	pub completed_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Ticket {
	/// Create a ticket with the product's defaults: BACKLOG, MEDIUM, TASK.
	pub fn new(
		project_id: Uuid,
		reporter_id: Uuid,
		number: u32,
		key: impl Into<String>,
		title: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: Uuid::new_v4(),
			project_id,
			number,
			key: key.into(),
			title: title.into(),
			description: None,
			kind: TicketKind::Task,
			priority: TicketPriority::Medium,
			status: TicketStatus::Backlog,
			reporter_id,
			assignee_id: None,
			story_points: None,
			estimated_hours: None,
			logged_hours: 0.0,
			progress: 0,
			due_date: None,
			completed_at: None,
			created_at: now,
			updated_at: now,
		}
	}
}

/// Next sequential number and key for a ticket in a project.
///
/// The store supplies the highest number already issued (`0` for an empty
/// project); keys follow the `<project key>-<number>` convention.
///
/// # Examples
///
/// ```
/// use synchro_workflow::next_ticket_key;
///
/// assert_eq!(next_ticket_key("SYN", 0), (1, "SYN-1".to_string()));
/// assert_eq!(next_ticket_key("SYN", 41), (42, "SYN-42".to_string()));
/// ```
pub fn next_ticket_key(project_key: &str, last_number: u32) -> (u32, String) {
	let number = last_number.saturating_add(1);
	let key = format!("{}-{}", project_key, number);
	(number, key)
}
