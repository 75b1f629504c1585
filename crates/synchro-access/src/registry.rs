//! Membership Registry
//!
//! In-memory registry for membership rows: invites, rank-checked role
//! changes, and soft deactivation. Persistence-backed deployments replace
//! this with their own store; the rank rules live here either way.

use crate::role::Role;
use crate::scoping::{effective_role, Membership, Scope};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Membership registry error
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
	/// No membership row with the given id
	MembershipNotFound,
	/// The user already holds an active membership in the scope
	AlreadyMember,
	/// The acting role does not outrank the affected role(s)
	InsufficientRank,
	/// Other error
	Other(String),
}

impl std::fmt::Display for MembershipError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			MembershipError::MembershipNotFound => write!(f, "Membership not found"),
			MembershipError::AlreadyMember => write!(f, "User is already a member of this scope"),
			MembershipError::InsufficientRank => write!(f, "Acting role does not outrank target"),
			MembershipError::Other(msg) => write!(f, "Error: {}", msg),
		}
	}
}

impl std::error::Error for MembershipError {}

/// Membership registry result
pub type MembershipResult<T> = Result<T, MembershipError>;

/// Registry of membership rows, indexed by user.
///
/// # Examples
///
/// ```
/// use synchro_access::{MembershipRegistry, Role, Scope};
/// use uuid::Uuid;
///
/// #[tokio::main]
/// async fn main() {
///     let registry = MembershipRegistry::new();
///     let org = Scope::organization(Uuid::new_v4());
///     let alice = Uuid::new_v4();
///
///     let membership = registry.add_member(alice, org, Role::Member).await.unwrap();
///     assert_eq!(membership.role, Role::Member);
///     assert_eq!(registry.resolve_role(alice, &org).await, Some(Role::Member));
/// }
/// ```
pub struct MembershipRegistry {
	memberships: Arc<RwLock<HashMap<Uuid, Membership>>>,
	user_index: Arc<RwLock<HashMap<Uuid, HashSet<Uuid>>>>,
}

impl MembershipRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			memberships: Arc::new(RwLock::new(HashMap::new())),
			user_index: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Add a member to a scope, as on invite or signup.
	///
	/// Fails with [`MembershipError::AlreadyMember`] when the user already
	/// holds an active membership in that exact scope.
	pub async fn add_member(
		&self,
		user_id: Uuid,
		scope: Scope,
		role: Role,
	) -> MembershipResult<Membership> {
		let memberships = self.memberships.read().await;
		let duplicate = memberships
			.values()
			.any(|m| m.user_id == user_id && m.scope == scope && m.is_active);
		drop(memberships);
		if duplicate {
			return Err(MembershipError::AlreadyMember);
		}

		let membership = Membership::new(user_id, scope, role);

		let mut memberships = self.memberships.write().await;
		let mut user_index = self.user_index.write().await;
		memberships.insert(membership.id, membership.clone());
		user_index.entry(user_id).or_default().insert(membership.id);

		tracing::debug!(
			user_id = %user_id,
			role = %role,
			"membership created"
		);
		Ok(membership)
	}

	/// Change the role on a membership row.
	///
	/// The acting role must strictly outrank both the member's current role
	/// and the requested role; peers (and the member themselves) can never
	/// grant or take rank.
	pub async fn change_role(
		&self,
		acting_role: Role,
		membership_id: Uuid,
		new_role: Role,
	) -> MembershipResult<Membership> {
		let mut memberships = self.memberships.write().await;
		let membership = memberships
			.get_mut(&membership_id)
			.ok_or(MembershipError::MembershipNotFound)?;

		if !acting_role.can_manage(membership.role) || !acting_role.can_manage(new_role) {
			tracing::warn!(
				membership_id = %membership_id,
				acting_role = %acting_role,
				current_role = %membership.role,
				requested_role = %new_role,
				"role change denied"
			);
			return Err(MembershipError::InsufficientRank);
		}

		membership.role = new_role;
		Ok(membership.clone())
	}

	/// Deactivate a membership, revoking access immediately.
	///
	/// The row is kept so the audit history stays intact; resolution treats
	/// it exactly like an absent membership.
	pub async fn deactivate(&self, acting_role: Role, membership_id: Uuid) -> MembershipResult<()> {
		let mut memberships = self.memberships.write().await;
		let membership = memberships
			.get_mut(&membership_id)
			.ok_or(MembershipError::MembershipNotFound)?;

		if !acting_role.can_manage(membership.role) {
			return Err(MembershipError::InsufficientRank);
		}

		membership.is_active = false;
		tracing::debug!(membership_id = %membership_id, "membership deactivated");
		Ok(())
	}

	/// Reactivate a previously deactivated membership.
	///
	/// Restores access with the role the row already carries. Subject to
	/// the same rank rule as [`MembershipRegistry::deactivate`].
	pub async fn reactivate(&self, acting_role: Role, membership_id: Uuid) -> MembershipResult<()> {
		let mut memberships = self.memberships.write().await;
		let membership = memberships
			.get_mut(&membership_id)
			.ok_or(MembershipError::MembershipNotFound)?;

		if !acting_role.can_manage(membership.role) {
			return Err(MembershipError::InsufficientRank);
		}

		membership.is_active = true;
		tracing::debug!(membership_id = %membership_id, "membership reactivated");
		Ok(())
	}

	/// Resolve the effective role of `user_id` in `scope`.
	///
	/// `None` means no access; callers surface it exactly like a permission
	/// denial, without revealing whether the scope exists.
	pub async fn resolve_role(&self, user_id: Uuid, scope: &Scope) -> Option<Role> {
		let memberships = self.memberships.read().await;
		let user_index = self.user_index.read().await;
		let rows: Vec<Membership> = user_index
			.get(&user_id)
			.into_iter()
			.flatten()
			.filter_map(|id| memberships.get(id).cloned())
			.collect();
		effective_role(&rows, user_id, scope)
	}

	/// Active memberships in a scope, e.g. for a member list page.
	pub async fn members_of(&self, scope: &Scope) -> Vec<Membership> {
		let memberships = self.memberships.read().await;
		let mut rows: Vec<Membership> = memberships
			.values()
			.filter(|m| m.scope == *scope && m.is_active)
			.cloned()
			.collect();
		rows.sort_by_key(|m| m.joined_at);
		rows
	}

	/// All active memberships held by a user across scopes.
	pub async fn memberships_of(&self, user_id: Uuid) -> Vec<Membership> {
		let memberships = self.memberships.read().await;
		let user_index = self.user_index.read().await;
		user_index
			.get(&user_id)
			.into_iter()
			.flatten()
			.filter_map(|id| memberships.get(id))
			.filter(|m| m.is_active)
			.cloned()
			.collect()
	}
}

impl Default for MembershipRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_duplicate_active_membership_rejected() {
		let registry = MembershipRegistry::new();
		let scope = Scope::organization(Uuid::new_v4());
		let user = Uuid::new_v4();

		registry.add_member(user, scope, Role::Member).await.unwrap();
		let err = registry.add_member(user, scope, Role::Admin).await.unwrap_err();
		assert_eq!(err, MembershipError::AlreadyMember);
	}

	#[tokio::test]
	async fn test_change_role_requires_strictly_higher_rank() {
		let registry = MembershipRegistry::new();
		let scope = Scope::organization(Uuid::new_v4());
		let membership = registry
			.add_member(Uuid::new_v4(), scope, Role::Manager)
			.await
			.unwrap();

		// A peer cannot manage.
		let err = registry
			.change_role(Role::Manager, membership.id, Role::Member)
			.await
			.unwrap_err();
		assert_eq!(err, MembershipError::InsufficientRank);

		// A higher rank cannot promote beyond what it outranks.
		let err = registry
			.change_role(Role::Admin, membership.id, Role::Admin)
			.await
			.unwrap_err();
		assert_eq!(err, MembershipError::InsufficientRank);

		let updated = registry
			.change_role(Role::Admin, membership.id, Role::Member)
			.await
			.unwrap();
		assert_eq!(updated.role, Role::Member);
	}

	#[tokio::test]
	async fn test_deactivation_revokes_access_immediately() {
		let registry = MembershipRegistry::new();
		let scope = Scope::organization(Uuid::new_v4());
		let user = Uuid::new_v4();
		let membership = registry.add_member(user, scope, Role::Member).await.unwrap();

		registry.deactivate(Role::Owner, membership.id).await.unwrap();
		assert_eq!(registry.resolve_role(user, &scope).await, None);
		assert!(registry.members_of(&scope).await.is_empty());
	}

	#[tokio::test]
	async fn test_reactivation_restores_access_with_prior_role() {
		let registry = MembershipRegistry::new();
		let scope = Scope::organization(Uuid::new_v4());
		let user = Uuid::new_v4();
		let membership = registry.add_member(user, scope, Role::Manager).await.unwrap();

		registry.deactivate(Role::Owner, membership.id).await.unwrap();
		assert_eq!(registry.resolve_role(user, &scope).await, None);

		// A peer cannot restore access.
		let err = registry
			.reactivate(Role::Manager, membership.id)
			.await
			.unwrap_err();
		assert_eq!(err, MembershipError::InsufficientRank);

		registry.reactivate(Role::Admin, membership.id).await.unwrap();
		assert_eq!(registry.resolve_role(user, &scope).await, Some(Role::Manager));
		assert_eq!(registry.members_of(&scope).await.len(), 1);

		let err = registry
			.reactivate(Role::Owner, Uuid::new_v4())
			.await
			.unwrap_err();
		assert_eq!(err, MembershipError::MembershipNotFound);
	}

	#[tokio::test]
	async fn test_independent_roles_per_scope() {
		let registry = MembershipRegistry::new();
		let org_a = Scope::organization(Uuid::new_v4());
		let org_b = Scope::organization(Uuid::new_v4());
		let user = Uuid::new_v4();

		registry.add_member(user, org_a, Role::Owner).await.unwrap();
		registry.add_member(user, org_b, Role::Guest).await.unwrap();

		assert_eq!(registry.resolve_role(user, &org_a).await, Some(Role::Owner));
		assert_eq!(registry.resolve_role(user, &org_b).await, Some(Role::Guest));
	}
}
