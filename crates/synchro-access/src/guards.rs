//! Access Guards
//!
//! Composable guard classes evaluated immediately before a mutating call
//! to the persistence layer. Guards never perform I/O themselves; the
//! caller resolves the actor's effective role first and hands it over in
//! the context. Supports builder-style composition (`AndGuard::new()`).

use crate::permissions::PermissionTable;
use crate::role::Role;
use crate::scoping::Actor;
use async_trait::async_trait;

/// Inputs for one guard evaluation.
///
/// `effective_role` is the authoritative role resolved from the membership
/// store for the target scope; `None` means the actor has no access there.
/// The advisory role carried on [`Actor`] is deliberately not consulted.
pub struct AccessContext<'a> {
	pub actor: &'a Actor,
	pub effective_role: Option<Role>,
	pub table: &'a PermissionTable,
}

/// A single yes/no authorization decision.
#[async_trait]
pub trait AccessGuard: Send + Sync {
	async fn allows(&self, context: &AccessContext<'_>) -> bool;
}

/// Requires one permission tag in the target scope.
///
/// # Examples
///
/// ```
/// use synchro_access::{
/// 	AccessContext, AccessGuard, Actor, HasPermission, PermissionTable, Role, tags,
/// };
/// use uuid::Uuid;
///
/// #[tokio::main]
/// async fn main() {
///     let table = PermissionTable::builtin();
///     let actor = Actor { id: Uuid::new_v4(), role: Role::Member, organization_id: None };
///     let guard = HasPermission::new(tags::TICKET_EDIT);
///
///     let context = AccessContext {
///         actor: &actor,
///         effective_role: Some(Role::Member),
///         table: &table,
///     };
///     assert!(guard.allows(&context).await);
///
///     // No membership in the scope: denied despite the table granting
///     // MEMBER ticket.edit.
///     let context = AccessContext { actor: &actor, effective_role: None, table: &table };
///     assert!(!guard.allows(&context).await);
/// }
/// ```
pub struct HasPermission {
	tag: String,
}

impl HasPermission {
	pub fn new(tag: impl Into<String>) -> Self {
		Self { tag: tag.into() }
	}
}

#[async_trait]
impl AccessGuard for HasPermission {
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		context
			.effective_role
			.is_some_and(|role| context.table.has_permission(role, &self.tag))
	}
}

/// Requires at least one of several permission tags.
pub struct HasAnyPermission {
	tags: Vec<String>,
}

impl HasAnyPermission {
	pub fn new(tags: Vec<impl Into<String>>) -> Self {
		Self {
			tags: tags.into_iter().map(|tag| tag.into()).collect(),
		}
	}
}

#[async_trait]
impl AccessGuard for HasAnyPermission {
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		let Some(role) = context.effective_role else {
			return false;
		};
		let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
		context.table.has_any_permission(role, &tags)
	}
}

/// Requires the effective role to strictly outrank a target member's role.
pub struct CanManageMember {
	target: Role,
}

impl CanManageMember {
	pub fn new(target: Role) -> Self {
		Self { target }
	}
}

#[async_trait]
impl AccessGuard for CanManageMember {
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		context
			.effective_role
			.is_some_and(|role| role.can_manage(self.target))
	}
}

/// Requires an administrative role (OWNER or ADMIN) in the target scope.
///
/// The console entry gate: same check the product applies before admin
/// pages and admin API handlers.
pub struct IsAdmin;

#[async_trait]
impl AccessGuard for IsAdmin {
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		context.effective_role.is_some_and(Role::is_admin)
	}
}

/// AND guard combinator. Both guards must allow.
pub struct AndGuard<A, B> {
	left: A,
	right: B,
}

impl<A, B> AndGuard<A, B> {
	pub fn new(left: A, right: B) -> Self {
		Self { left, right }
	}
}

#[async_trait]
impl<A, B> AccessGuard for AndGuard<A, B>
where
	A: AccessGuard,
	B: AccessGuard,
{
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		self.left.allows(context).await && self.right.allows(context).await
	}
}

/// OR guard combinator. Either guard can allow.
pub struct OrGuard<A, B> {
	left: A,
	right: B,
}

impl<A, B> OrGuard<A, B> {
	pub fn new(left: A, right: B) -> Self {
		Self { left, right }
	}
}

#[async_trait]
impl<A, B> AccessGuard for OrGuard<A, B>
where
	A: AccessGuard,
	B: AccessGuard,
{
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		self.left.allows(context).await || self.right.allows(context).await
	}
}

/// NOT guard combinator. Inverts the wrapped guard.
pub struct NotGuard<A> {
	inner: A,
}

impl<A> NotGuard<A> {
	pub fn new(inner: A) -> Self {
		Self { inner }
	}
}

#[async_trait]
impl<A> AccessGuard for NotGuard<A>
where
	A: AccessGuard,
{
	async fn allows(&self, context: &AccessContext<'_>) -> bool {
		!self.inner.allows(context).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::permissions::tags;
	use rstest::rstest;
	use uuid::Uuid;

	fn make_actor(role: Role) -> Actor {
		Actor {
			id: Uuid::new_v4(),
			role,
			organization_id: None,
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_advisory_role_is_ignored() {
		// Token says OWNER, membership store says nothing: denied.
		let table = PermissionTable::builtin();
		let actor = make_actor(Role::Owner);
		let guard = HasPermission::new(tags::ORG_DELETE);

		let context = AccessContext {
			actor: &actor,
			effective_role: None,
			table: &table,
		};
		assert!(!guard.allows(&context).await);
	}

	#[rstest]
	#[tokio::test]
	async fn test_guard_composition() {
		let table = PermissionTable::builtin();
		let actor = make_actor(Role::Manager);
		let context = AccessContext {
			actor: &actor,
			effective_role: Some(Role::Manager),
			table: &table,
		};

		let edit_and_assign = AndGuard::new(
			HasPermission::new(tags::TICKET_EDIT),
			HasPermission::new(tags::TICKET_ASSIGN),
		);
		assert!(edit_and_assign.allows(&context).await);

		let admin_or_edit = OrGuard::new(IsAdmin, HasPermission::new(tags::TICKET_EDIT));
		assert!(admin_or_edit.allows(&context).await);

		let not_admin = NotGuard::new(IsAdmin);
		assert!(not_admin.allows(&context).await);
	}
}
