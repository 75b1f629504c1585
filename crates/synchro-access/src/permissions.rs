//! Permission Table
//!
//! A fixed, centrally-defined mapping from role to capability set,
//! consulted synchronously before every mutating operation. The table is
//! built once and passed into call sites explicitly; there is no runtime
//! mutation path and no ambient global.

use crate::role::Role;
use std::collections::{HashMap, HashSet};

/// Stable permission tag strings consumed by callers.
pub mod tags {
	pub const ORG_DELETE: &str = "org.delete";
	pub const ORG_SETTINGS: &str = "org.settings";
	pub const ORG_BILLING: &str = "org.billing";
	pub const ORG_MEMBERS_MANAGE: &str = "org.members.manage";
	pub const ORG_MEMBERS_INVITE: &str = "org.members.invite";
	pub const ORG_MEMBERS_VIEW: &str = "org.members.view";
	pub const PROJECT_CREATE: &str = "project.create";
	pub const PROJECT_DELETE: &str = "project.delete";
	pub const PROJECT_SETTINGS: &str = "project.settings";
	pub const PROJECT_MEMBERS_MANAGE: &str = "project.members.manage";
	pub const TICKET_CREATE: &str = "ticket.create";
	pub const TICKET_EDIT: &str = "ticket.edit";
	pub const TICKET_DELETE: &str = "ticket.delete";
	pub const TICKET_ASSIGN: &str = "ticket.assign";
	pub const TICKET_VIEW: &str = "ticket.view";
	pub const TIME_LOG_CREATE: &str = "time.log.create";
	pub const TIME_LOG_APPROVE: &str = "time.log.approve";
	pub const ADMIN_ACCESS: &str = "admin.access";
}

/// Immutable role-to-permission mapping.
///
/// Checks are pure set-membership tests: no wildcards, no inheritance
/// beyond the precomputed per-role sets. A role absent from the table
/// (which the builtin table never produces) fails closed.
///
/// # Examples
///
/// ```
/// use synchro_access::{PermissionTable, Role, tags};
///
/// let table = PermissionTable::builtin();
/// assert!(table.has_permission(Role::Owner, tags::ORG_DELETE));
/// assert!(!table.has_permission(Role::Guest, tags::ORG_DELETE));
/// assert!(table.has_permission(Role::Member, tags::TICKET_CREATE));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionTable {
	grants: HashMap<Role, HashSet<&'static str>>,
}

impl PermissionTable {
	/// Build the product's permission matrix.
	///
	/// Every tag in [`tags`] is granted to at least one role. OWNER holds
	/// the full management surface; GUEST holds read-only ticket access.
	pub fn builtin() -> Self {
		let mut grants: HashMap<Role, HashSet<&'static str>> = HashMap::new();

		grants.insert(
			Role::Owner,
			HashSet::from([
				tags::ORG_DELETE,
				tags::ORG_SETTINGS,
				tags::ORG_BILLING,
				tags::ORG_MEMBERS_MANAGE,
				tags::ORG_MEMBERS_INVITE,
				tags::ORG_MEMBERS_VIEW,
				tags::PROJECT_CREATE,
				tags::PROJECT_DELETE,
				tags::PROJECT_SETTINGS,
				tags::PROJECT_MEMBERS_MANAGE,
				tags::TICKET_CREATE,
				tags::TICKET_EDIT,
				tags::TICKET_DELETE,
				tags::TICKET_ASSIGN,
				tags::TIME_LOG_CREATE,
				tags::TIME_LOG_APPROVE,
				tags::ADMIN_ACCESS,
			]),
		);
		grants.insert(
			Role::Admin,
			HashSet::from([
				tags::ORG_SETTINGS,
				tags::ORG_MEMBERS_MANAGE,
				tags::ORG_MEMBERS_INVITE,
				tags::PROJECT_CREATE,
				tags::PROJECT_DELETE,
				tags::PROJECT_SETTINGS,
				tags::PROJECT_MEMBERS_MANAGE,
				tags::TICKET_CREATE,
				tags::TICKET_EDIT,
				tags::TICKET_DELETE,
				tags::TICKET_ASSIGN,
				tags::TIME_LOG_CREATE,
				tags::TIME_LOG_APPROVE,
				tags::ADMIN_ACCESS,
			]),
		);
		grants.insert(
			Role::Manager,
			HashSet::from([
				tags::ORG_MEMBERS_VIEW,
				tags::PROJECT_CREATE,
				tags::PROJECT_SETTINGS,
				tags::PROJECT_MEMBERS_MANAGE,
				tags::TICKET_CREATE,
				tags::TICKET_EDIT,
				tags::TICKET_DELETE,
				tags::TICKET_ASSIGN,
				tags::TIME_LOG_CREATE,
				tags::TIME_LOG_APPROVE,
			]),
		);
		grants.insert(
			Role::Member,
			HashSet::from([tags::TICKET_CREATE, tags::TICKET_EDIT, tags::TIME_LOG_CREATE]),
		);
		grants.insert(Role::Guest, HashSet::from([tags::TICKET_VIEW]));

		Self { grants }
	}

	/// Check whether `role` holds `tag`.
	///
	/// Unknown tags and missing roles return `false`; this never panics.
	///
	/// # Examples
	///
	/// ```
	/// use synchro_access::{PermissionTable, Role, tags};
	///
	/// let table = PermissionTable::builtin();
	/// assert!(table.has_permission(Role::Manager, tags::TICKET_ASSIGN));
	/// assert!(!table.has_permission(Role::Manager, "org.billing"));
	/// assert!(!table.has_permission(Role::Owner, "no.such.tag"));
	/// ```
	pub fn has_permission(&self, role: Role, tag: &str) -> bool {
		self.grants
			.get(&role)
			.is_some_and(|perms| perms.contains(tag))
	}

	/// Check whether `role` holds at least one of `tags`.
	///
	/// # Examples
	///
	/// ```
	/// use synchro_access::{PermissionTable, Role, tags};
	///
	/// let table = PermissionTable::builtin();
	/// assert!(table.has_any_permission(Role::Member, &[tags::ORG_DELETE, tags::TICKET_EDIT]));
	/// assert!(!table.has_any_permission(Role::Guest, &[tags::ORG_DELETE, tags::TICKET_EDIT]));
	/// ```
	pub fn has_any_permission(&self, role: Role, tags: &[&str]) -> bool {
		tags.iter().any(|tag| self.has_permission(role, tag))
	}

	/// All tags granted to `role`.
	pub fn permissions_for(&self, role: Role) -> HashSet<&'static str> {
		self.grants.get(&role).cloned().unwrap_or_default()
	}
}

impl Default for PermissionTable {
	fn default() -> Self {
		Self::builtin()
	}
}
