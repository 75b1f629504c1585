//! Membership Scoping
//!
//! Resolves an actor's effective role inside a target scope. Scoping is
//! strict: holding a role elsewhere grants nothing here, and an inactive
//! membership is indistinguishable from an absent one.

use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization or project boundary within which a role applies.
///
/// A project scope carries its owning organization so that project-scoped
/// checks can fall back to the organization membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
	Organization { organization_id: Uuid },
	Project { project_id: Uuid, organization_id: Uuid },
}

impl Scope {
	/// Organization-level scope.
	pub fn organization(organization_id: Uuid) -> Self {
		Scope::Organization { organization_id }
	}

	/// Project-level scope within `organization_id`.
	pub fn project(project_id: Uuid, organization_id: Uuid) -> Self {
		Scope::Project {
			project_id,
			organization_id,
		}
	}

	/// The organization this scope ultimately belongs to.
	pub fn organization_id(&self) -> Uuid {
		match *self {
			Scope::Organization { organization_id } => organization_id,
			Scope::Project {
				organization_id, ..
			} => organization_id,
		}
	}
}

/// The record binding a user to a scope with a role and an active flag.
///
/// Memberships are deactivated rather than deleted so the audit history
/// stays intact. A user may hold independent roles in different scopes at
/// the same time.
///
/// # Examples
///
/// ```
/// use synchro_access::{Membership, Role, Scope};
/// use uuid::Uuid;
///
/// let org = Uuid::new_v4();
/// let membership = Membership::new(Uuid::new_v4(), Scope::organization(org), Role::Member);
/// assert!(membership.is_active);
/// assert_eq!(membership.role, Role::Member);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
	pub id: Uuid,
	pub user_id: Uuid,
	pub scope: Scope,
	pub role: Role,
	pub is_active: bool,
	pub joined_at: DateTime<Utc>,
}

impl Membership {
	/// Create an active membership, as on invite or signup.
	pub fn new(user_id: Uuid, scope: Scope, role: Role) -> Self {
		Self {
			id: Uuid::new_v4(),
			user_id,
			scope,
			role,
			is_active: true,
			joined_at: Utc::now(),
		}
	}
}

/// Actor identity as supplied by the external authentication collaborator.
///
/// The carried `role` is a session-token snapshot and is advisory only
/// (UI rendering). Authorization decisions with side effects re-resolve
/// the authoritative role from the membership store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
	pub id: Uuid,
	pub role: Role,
	pub organization_id: Option<Uuid>,
}

/// Resolve the effective role of `user_id` in `scope` from loaded
/// membership rows.
///
/// Project-scoped lookups prefer a project membership and fall back to the
/// membership in the project's owning organization. Organization-scoped
/// lookups never consult project rows. `None` means no access, which
/// callers surface exactly like a permission denial.
///
/// # Examples
///
/// ```
/// use synchro_access::{effective_role, Membership, Role, Scope};
/// use uuid::Uuid;
///
/// let user = Uuid::new_v4();
/// let org = Uuid::new_v4();
/// let project = Uuid::new_v4();
///
/// let memberships = vec![
///     Membership::new(user, Scope::organization(org), Role::Admin),
///     Membership::new(user, Scope::project(project, org), Role::Member),
/// ];
///
/// // The project role wins for project-scoped actions.
/// let scope = Scope::project(project, org);
/// assert_eq!(effective_role(&memberships, user, &scope), Some(Role::Member));
///
/// // Organization-scoped actions use the organization role.
/// let scope = Scope::organization(org);
/// assert_eq!(effective_role(&memberships, user, &scope), Some(Role::Admin));
/// ```
pub fn effective_role(memberships: &[Membership], user_id: Uuid, scope: &Scope) -> Option<Role> {
	let mine = |membership: &&Membership| membership.user_id == user_id && membership.is_active;

	match *scope {
		Scope::Project {
			project_id,
			organization_id,
		} => {
			let project_role = memberships
				.iter()
				.filter(mine)
				.find(|m| {
					matches!(m.scope, Scope::Project { project_id: p, .. } if p == project_id)
				})
				.map(|m| m.role);
			if project_role.is_some() {
				return project_role;
			}
			org_role(memberships, user_id, organization_id)
		}
		Scope::Organization { organization_id } => {
			org_role(memberships, user_id, organization_id)
		}
	}
}

fn org_role(memberships: &[Membership], user_id: Uuid, organization_id: Uuid) -> Option<Role> {
	memberships
		.iter()
		.filter(|m| m.user_id == user_id && m.is_active)
		.find(|m| matches!(m.scope, Scope::Organization { organization_id: o } if o == organization_id))
		.map(|m| m.role)
}
