//! Ticket Status Vocabulary
//!
//! The board columns a ticket can sit in. Anything outside this
//! vocabulary is a validation error surfaced before any mutation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Status of a ticket on the board.
///
/// # Examples
///
/// ```
/// use synchro_workflow::TicketStatus;
///
/// let status: TicketStatus = "IN_PROGRESS".parse().unwrap();
/// assert_eq!(status, TicketStatus::InProgress);
/// assert!("SHIPPED".parse::<TicketStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
	Backlog,
	Todo,
	InProgress,
	InReview,
	Testing,
	Done,
	Cancelled,
}

impl TicketStatus {
	/// Wire representation of this status.
	pub fn as_str(self) -> &'static str {
		match self {
			TicketStatus::Backlog => "BACKLOG",
			TicketStatus::Todo => "TODO",
			TicketStatus::InProgress => "IN_PROGRESS",
			TicketStatus::InReview => "IN_REVIEW",
			TicketStatus::Testing => "TESTING",
			TicketStatus::Done => "DONE",
			TicketStatus::Cancelled => "CANCELLED",
		}
	}

	/// Whether this status ends the ticket's working life.
	pub fn is_terminal(self) -> bool {
		matches!(self, TicketStatus::Done | TicketStatus::Cancelled)
	}
}

impl fmt::Display for TicketStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing a string outside the status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ticket status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for TicketStatus {
	type Err = StatusParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"BACKLOG" => Ok(TicketStatus::Backlog),
			"TODO" => Ok(TicketStatus::Todo),
			"IN_PROGRESS" => Ok(TicketStatus::InProgress),
			"IN_REVIEW" => Ok(TicketStatus::InReview),
			"TESTING" => Ok(TicketStatus::Testing),
			"DONE" => Ok(TicketStatus::Done),
			"CANCELLED" => Ok(TicketStatus::Cancelled),
			other => Err(StatusParseError(other.to_string())),
		}
	}
}

/// Whether a ticket may move from `current` to `requested`.
///
/// Any known status may move to any other known status. Boards rely on
/// free movement for manual correction (a DONE ticket dragged back to
/// BACKLOG is legal), so no adjacency graph is enforced here. This is the
/// seam where a stricter digraph would land.
///
/// # Examples
///
/// ```
/// use synchro_workflow::{can_transition, TicketStatus};
///
/// assert!(can_transition(TicketStatus::Todo, TicketStatus::InProgress));
/// assert!(can_transition(TicketStatus::Done, TicketStatus::Backlog));
/// ```
pub fn can_transition(_current: TicketStatus, _requested: TicketStatus) -> bool {
	true
}
