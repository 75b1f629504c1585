//! # Synchro PM
//!
//! The rule engine behind the Synchro PM project-management suite:
//! everything that decides *whether* a request may happen and *what* a
//! permitted change entails, with no I/O of its own.
//!
//! The engine is split into two member crates, re-exported here:
//!
//! - [`access`]: role hierarchy, permission table, membership scoping,
//!   and composable access guards
//! - [`workflow`]: ticket status lifecycle, transition side effects, and
//!   the append-only activity log
//!
//! ## Core Principles
//!
//! - **Pure decisions**: every check is a synchronous lookup or reduction
//!   over already-loaded state; persistence, HTTP, credential handling,
//!   and real-time delivery stay with external collaborators
//! - **Fail closed**: unknown roles, unknown tags, and missing
//!   memberships all deny; denial never throws and never reveals whether
//!   the resource exists
//! - **Guard before mutation**: handlers resolve the effective role,
//!   evaluate the guard, apply the change, and only then record the
//!   activity
//!
//! ## Quick Start
//!
//! ```rust
//! use synchro::access::{PermissionTable, Role, tags};
//! use synchro::workflow::{guarded_transition, Ticket, TicketStatus};
//! use uuid::Uuid;
//!
//! let table = PermissionTable::builtin();
//! assert!(table.has_permission(Role::Member, tags::TICKET_EDIT));
//!
//! let ticket = Ticket::new(Uuid::new_v4(), Uuid::new_v4(), 1, "SYN-1", "Wire up login");
//! let outcome =
//!     guarded_transition(&table, Some(Role::Member), &ticket, TicketStatus::Todo, Uuid::new_v4())
//!         .expect("member holds ticket.edit");
//! assert!(outcome.changed);
//! ```

pub use synchro_access as access;
pub use synchro_workflow as workflow;

pub use synchro_access::{
	effective_role, tags, AccessContext, AccessGuard, Actor, Membership, MembershipRegistry,
	PermissionTable, Role, Scope,
};
pub use synchro_workflow::{
	apply_transition, guarded_transition, Activity, ActivityDraft, ActivityKind, ActivityLog,
	Ticket, TicketKind, TicketPriority, TicketStatus, TransitionError, TransitionOutcome,
};
