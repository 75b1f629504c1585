//! Status Transitions
//!
//! Applies a requested status to a ticket and derives the side effects:
//! one-shot completion stamping and a STATUS_CHANGED activity draft.
//! The permission gate runs before anything is touched, so a denied
//! request leaves no partial state.

use crate::activity::{ActivityDraft, ActivityKind};
use crate::status::{can_transition, TicketStatus};
use crate::ticket::Ticket;
use chrono::Utc;
use synchro_access::{tags, PermissionTable, Role};
use thiserror::Error;
use uuid::Uuid;

/// Transition failure, raised before any mutation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
	/// The actor lacks `ticket.edit` in the owning project, or has no
	/// membership there at all. Indistinguishable on purpose.
	#[error("permission denied")]
	PermissionDenied,
	/// The requested movement is not a legal transition.
	#[error("cannot move ticket from {from} to {to}")]
	IllegalTransition { from: TicketStatus, to: TicketStatus },
}

/// Result of a transition: the updated ticket and, when the status value
/// actually changed, exactly one activity draft to record.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
	pub ticket: Ticket,
	pub activity: Option<ActivityDraft>,
	/// Whether the status value changed. No-op updates leave the ticket
	/// byte-identical and carry no activity.
	pub changed: bool,
}

/// Apply `requested` to a ticket.
///
/// - A no-op (requested == current) returns the ticket untouched, with no
///   activity and no timestamp churn.
/// - A value change into DONE stamps `completed_at`, but only while it is
///   unset: leaving DONE and coming back never re-stamps.
/// - Every value change yields exactly one STATUS_CHANGED draft carrying
///   `{from, to}` metadata.
///
/// # Examples
///
/// ```
/// use synchro_workflow::{apply_transition, Ticket, TicketStatus};
/// use uuid::Uuid;
///
/// let mut ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 1, "SYN-1", "Ship it");
/// ticket.status = TicketStatus::InProgress;
///
/// let outcome = apply_transition(&ticket, TicketStatus::Done, Uuid::new_v4());
/// assert!(outcome.changed);
/// assert!(outcome.ticket.completed_at.is_some());
/// assert!(outcome.activity.is_some());
///
/// // Re-submitting DONE is a no-op: nothing stamped, nothing emitted.
/// let again = apply_transition(&outcome.ticket, TicketStatus::Done, Uuid::new_v4());
/// assert!(!again.changed);
/// assert!(again.activity.is_none());
/// assert_eq!(again.ticket, outcome.ticket);
/// ```
pub fn apply_transition(
	ticket: &Ticket,
	requested: TicketStatus,
	actor_id: Uuid,
) -> TransitionOutcome {
	if requested == ticket.status {
		return TransitionOutcome {
			ticket: ticket.clone(),
			activity: None,
			changed: false,
		};
	}

	let previous = ticket.status;
	let mut updated = ticket.clone();
	let now = Utc::now();
	updated.status = requested;
	updated.updated_at = now;
	if requested == TicketStatus::Done && updated.completed_at.is_none() {
		updated.completed_at = Some(now);
	}

	let activity = ActivityDraft {
		project_id: Some(ticket.project_id),
		ticket_id: Some(ticket.id),
		actor_id,
		kind: ActivityKind::StatusChanged,
		description: format!("changed status from {} to {}", previous, requested),
		metadata: Some(serde_json::json!({ "from": previous, "to": requested })),
	};

	TransitionOutcome {
		ticket: updated,
		activity: Some(activity),
		changed: true,
	}
}

/// Permission-gated transition.
///
/// `effective_role` is the actor's role resolved in the ticket's owning
/// project scope (`None` when the actor has no membership there). The
/// gate runs first: a denied request fails fast and the ticket is left
/// untouched, with nothing to record.
///
/// # Examples
///
/// ```
/// use synchro_access::{PermissionTable, Role};
/// use synchro_workflow::{guarded_transition, Ticket, TicketStatus, TransitionError};
/// use uuid::Uuid;
///
/// let table = PermissionTable::builtin();
/// let ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 1, "SYN-1", "Ship it");
///
/// let outcome =
///     guarded_transition(&table, Some(Role::Member), &ticket, TicketStatus::Todo, Uuid::new_v4());
/// assert!(outcome.is_ok());
///
/// // GUEST holds ticket.view only; the request never reaches the ticket.
/// let denied =
///     guarded_transition(&table, Some(Role::Guest), &ticket, TicketStatus::Todo, Uuid::new_v4());
/// assert_eq!(denied.unwrap_err(), TransitionError::PermissionDenied);
/// ```
pub fn guarded_transition(
	table: &PermissionTable,
	effective_role: Option<Role>,
	ticket: &Ticket,
	requested: TicketStatus,
	actor_id: Uuid,
) -> Result<TransitionOutcome, TransitionError> {
	let permitted =
		effective_role.is_some_and(|role| table.has_permission(role, tags::TICKET_EDIT));
	if !permitted {
		tracing::warn!(ticket = %ticket.key, requested = %requested, "transition denied");
		return Err(TransitionError::PermissionDenied);
	}

	if !can_transition(ticket.status, requested) {
		return Err(TransitionError::IllegalTransition {
			from: ticket.status,
			to: requested,
		});
	}

	Ok(apply_transition(ticket, requested, actor_id))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_completed_at_is_stamped_exactly_once() {
		let mut ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 1, "SYN-1", "t");
		ticket.status = TicketStatus::InProgress;
		let actor = Uuid::new_v4();

		let done = apply_transition(&ticket, TicketStatus::Done, actor);
		let stamped = done.ticket.completed_at;
		assert!(stamped.is_some());

		// Reopen and complete again: the original stamp survives.
		let reopened = apply_transition(&done.ticket, TicketStatus::Backlog, actor);
		assert_eq!(reopened.ticket.completed_at, stamped);

		let redone = apply_transition(&reopened.ticket, TicketStatus::Done, actor);
		assert_eq!(redone.ticket.completed_at, stamped);
	}

	#[test]
	fn test_denied_transition_mutates_nothing() {
		let table = PermissionTable::builtin();
		let ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 1, "SYN-1", "t");

		let err = guarded_transition(&table, None, &ticket, TicketStatus::Done, Uuid::new_v4());
		assert_eq!(err.unwrap_err(), TransitionError::PermissionDenied);
		assert_eq!(ticket.status, TicketStatus::Backlog);
		assert!(ticket.completed_at.is_none());
	}
}
