//! # Synchro Workflow
//!
//! Ticket lifecycle rules and activity recording for Synchro PM.
//!
//! ## Features
//!
//! - **Status vocabulary**: the board columns, with strict parsing and
//!   deliberately permissive movement between them
//! - **Transitions**: no-op detection, one-shot `completed_at` stamping on
//!   the first move into DONE, and exactly one STATUS_CHANGED activity per
//!   actual change
//! - **Permission gating**: `guarded_transition` consults the
//!   `synchro-access` table before touching the ticket, so denials leave no
//!   partial state
//! - **Activity log**: append-only audit trail scoped to the organization,
//!   recorded only after the described mutation committed
//!
//! ## Quick Start
//!
//! ```rust
//! use synchro_workflow::{apply_transition, Ticket, TicketStatus};
//! use uuid::Uuid;
//!
//! let ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 1, "SYN-1", "Wire up login");
//! let outcome = apply_transition(&ticket, TicketStatus::InProgress, Uuid::new_v4());
//! assert!(outcome.changed);
//! ```

pub mod activity;
pub mod status;
pub mod ticket;
pub mod transition;

pub use activity::{Activity, ActivityDraft, ActivityKind, ActivityLog};
pub use status::{can_transition, StatusParseError, TicketStatus};
pub use ticket::{next_ticket_key, Ticket, TicketKind, TicketPriority};
pub use transition::{apply_transition, guarded_transition, TransitionError, TransitionOutcome};
