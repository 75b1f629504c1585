//! # Synchro Access
//!
//! Authorization rules for Synchro PM: the role hierarchy, the
//! role-to-permission table, membership scoping, and composable access
//! guards.
//!
//! ## Features
//!
//! - **Role hierarchy**: `OWNER > ADMIN > MANAGER > MEMBER > GUEST` with
//!   strict rank comparison for member-management checks
//! - **Permission table**: immutable role→tag-set mapping, pure
//!   set-membership lookups, fails closed on anything unknown
//! - **Membership scoping**: per-scope role resolution with
//!   project-over-organization precedence; inactive rows revoke access
//!   immediately
//! - **Access guards**: composable yes/no decision classes evaluated before
//!   every mutating call to the external persistence layer
//!
//! ## Quick Start
//!
//! ```rust
//! use synchro_access::{PermissionTable, Role, tags};
//!
//! let table = PermissionTable::builtin();
//! assert!(table.has_permission(Role::Owner, tags::ORG_DELETE));
//! assert!(!table.has_permission(Role::Guest, tags::ORG_DELETE));
//! ```
//!
//! ## Design Notes
//!
//! Every function here is a synchronous, referentially transparent
//! decision over in-memory data. Nothing performs I/O; the surrounding
//! application loads membership rows, asks this crate for a verdict, and
//! only then calls its store. Denial is always a `false`/`None`, never an
//! error, and is indistinguishable from "resource does not exist".

pub mod guards;
pub mod permissions;
pub mod registry;
pub mod role;
pub mod scoping;

pub use guards::{
	AccessContext, AccessGuard, AndGuard, CanManageMember, HasAnyPermission, HasPermission,
	IsAdmin, NotGuard, OrGuard,
};
pub use permissions::{tags, PermissionTable};
pub use registry::{MembershipError, MembershipRegistry, MembershipResult};
pub use role::{Role, RoleParseError, ROLE_HIERARCHY};
pub use scoping::{effective_role, Actor, Membership, Scope};
