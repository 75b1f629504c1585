//! Role Hierarchy
//!
//! Organization- and project-level roles with a strict total order.
//! Role rank drives both permission lookups and "can actor A manage
//! actor B" decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A ranked capability level held by a user within one scope.
///
/// Roles are ordered `OWNER > ADMIN > MANAGER > MEMBER > GUEST`. A role is
/// always bound to a specific organization or project membership, never held
/// globally.
///
/// # Examples
///
/// ```
/// use synchro_access::Role;
///
/// assert!(Role::Owner.can_manage(Role::Admin));
/// assert!(!Role::Admin.can_manage(Role::Admin));
/// assert_eq!(Role::Owner.as_str(), "OWNER");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	Owner,
	Admin,
	Manager,
	Member,
	Guest,
}

/// The full hierarchy, highest rank first.
pub const ROLE_HIERARCHY: [Role; 5] = [
	Role::Owner,
	Role::Admin,
	Role::Manager,
	Role::Member,
	Role::Guest,
];

impl Role {
	/// Position in the hierarchy; lower is higher-ranked.
	pub fn rank(self) -> usize {
		match self {
			Role::Owner => 0,
			Role::Admin => 1,
			Role::Manager => 2,
			Role::Member => 3,
			Role::Guest => 4,
		}
	}

	/// Wire representation of this role.
	pub fn as_str(self) -> &'static str {
		match self {
			Role::Owner => "OWNER",
			Role::Admin => "ADMIN",
			Role::Manager => "MANAGER",
			Role::Member => "MEMBER",
			Role::Guest => "GUEST",
		}
	}

	/// Whether an actor holding `self` may manage a member holding `target`.
	///
	/// Requires a strictly higher rank. Equal rank is always denied, so a
	/// role can never manage a peer or itself.
	///
	/// # Examples
	///
	/// ```
	/// use synchro_access::Role;
	///
	/// assert!(Role::Admin.can_manage(Role::Member));
	/// assert!(!Role::Member.can_manage(Role::Admin));
	/// assert!(!Role::Guest.can_manage(Role::Guest));
	/// ```
	pub fn can_manage(self, target: Role) -> bool {
		self.rank() < target.rank()
	}

	/// Reduce the roles a user holds across scopes to the highest-ranked one.
	///
	/// An empty collection yields [`Role::Guest`], the safe floor.
	///
	/// # Examples
	///
	/// ```
	/// use synchro_access::Role;
	///
	/// let roles = [Role::Member, Role::Owner, Role::Guest];
	/// assert_eq!(Role::highest(roles), Role::Owner);
	/// assert_eq!(Role::highest([]), Role::Guest);
	/// ```
	pub fn highest<I>(roles: I) -> Role
	where
		I: IntoIterator<Item = Role>,
	{
		let held: Vec<Role> = roles.into_iter().collect();
		ROLE_HIERARCHY
			.into_iter()
			.find(|role| held.contains(role))
			.unwrap_or(Role::Guest)
	}

	/// Whether this role grants administrative access (OWNER or ADMIN).
	pub fn is_admin(self) -> bool {
		matches!(self, Role::Owner | Role::Admin)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing a string that is not a known role.
///
/// Callers treat an unparseable role as holding no permissions; parsing
/// never grants by default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
	type Err = RoleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"OWNER" => Ok(Role::Owner),
			"ADMIN" => Ok(Role::Admin),
			"MANAGER" => Ok(Role::Manager),
			"MEMBER" => Ok(Role::Member),
			"GUEST" => Ok(Role::Guest),
			other => Err(RoleParseError(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_hierarchy_is_strictly_ordered() {
		for window in ROLE_HIERARCHY.windows(2) {
			assert!(window[0].rank() < window[1].rank());
		}
	}

	#[rstest]
	#[case(Role::Owner, Role::Owner, false)]
	#[case(Role::Owner, Role::Guest, true)]
	#[case(Role::Guest, Role::Owner, false)]
	#[case(Role::Manager, Role::Member, true)]
	#[case(Role::Member, Role::Manager, false)]
	fn test_can_manage(#[case] actor: Role, #[case] target: Role, #[case] expected: bool) {
		assert_eq!(actor.can_manage(target), expected);
	}

	#[rstest]
	fn test_roundtrip_parse() {
		for role in ROLE_HIERARCHY {
			assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
		}
		assert!("SUPERUSER".parse::<Role>().is_err());
	}
}
