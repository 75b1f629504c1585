//! Activity Recording
//!
//! Append-only audit trail. Activities are created as a side effect of
//! permitted mutations, after the mutation itself succeeded, and are
//! never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Kind of change an activity describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
	Created,
	Updated,
	StatusChanged,
	Assigned,
	Commented,
	MemberAdded,
	MemberRemoved,
}

/// An immutable audit-log entry describing one committed change.
///
/// Owned by the Organization aggregate; references (but does not own)
/// the project and ticket it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
	pub id: Uuid,
	pub organization_id: Uuid,
	pub project_id: Option<Uuid>,
	pub ticket_id: Option<Uuid>,
	pub actor_id: Uuid,
	pub kind: ActivityKind,
	pub description: String,
	pub metadata: Option<Value>,
	pub created_at: DateTime<Utc>,
}

/// A not-yet-recorded activity, produced by a rule alongside its
/// mutation. The caller attaches the owning organization when it records
/// the draft, after its own mutation succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDraft {
	pub project_id: Option<Uuid>,
	pub ticket_id: Option<Uuid>,
	pub actor_id: Uuid,
	pub kind: ActivityKind,
	pub description: String,
	pub metadata: Option<Value>,
}

impl ActivityDraft {
	/// Draft for a freshly created ticket.
	pub fn ticket_created(project_id: Uuid, ticket_id: Uuid, actor_id: Uuid, key: &str) -> Self {
		Self {
			project_id: Some(project_id),
			ticket_id: Some(ticket_id),
			actor_id,
			kind: ActivityKind::Created,
			description: format!("created ticket {}", key),
			metadata: None,
		}
	}

	/// Draft for a ticket handed to a new assignee.
	pub fn ticket_assigned(
		project_id: Uuid,
		ticket_id: Uuid,
		actor_id: Uuid,
		key: &str,
		assignee_id: Uuid,
	) -> Self {
		Self {
			project_id: Some(project_id),
			ticket_id: Some(ticket_id),
			actor_id,
			kind: ActivityKind::Assigned,
			description: format!("assigned ticket {}", key),
			metadata: Some(serde_json::json!({ "assignee": assignee_id })),
		}
	}
}

/// Append-only activity log.
///
/// There is deliberately no update or delete surface: once recorded, an
/// entry is history.
///
/// # Examples
///
/// ```
/// use synchro_workflow::{ActivityDraft, ActivityKind, ActivityLog};
/// use uuid::Uuid;
///
/// #[tokio::main]
/// async fn main() {
///     let log = ActivityLog::new();
///     let org = Uuid::new_v4();
///     let project = Uuid::new_v4();
///
///     let draft = ActivityDraft::ticket_created(project, Uuid::new_v4(), Uuid::new_v4(), "SYN-1");
///     let activity = log.record(org, draft).await;
///     assert_eq!(activity.kind, ActivityKind::Created);
///     assert_eq!(log.for_organization(org).await.len(), 1);
/// }
/// ```
pub struct ActivityLog {
	entries: Arc<RwLock<Vec<Activity>>>,
}

impl ActivityLog {
	/// Create an empty log
	pub fn new() -> Self {
		Self {
			entries: Arc::new(RwLock::new(Vec::new())),
		}
	}

	/// Append a draft under `organization_id` and return the stored record.
	///
	/// Call this only after the mutation the draft describes has been
	/// committed, so the trail never mentions changes that were rolled
	/// back.
	pub async fn record(&self, organization_id: Uuid, draft: ActivityDraft) -> Activity {
		let activity = Activity {
			id: Uuid::new_v4(),
			organization_id,
			project_id: draft.project_id,
			ticket_id: draft.ticket_id,
			actor_id: draft.actor_id,
			kind: draft.kind,
			description: draft.description,
			metadata: draft.metadata,
			created_at: Utc::now(),
		};

		let mut entries = self.entries.write().await;
		entries.push(activity.clone());
		tracing::debug!(
			organization_id = %organization_id,
			kind = ?activity.kind,
			"activity recorded"
		);
		activity
	}

	/// All entries for an organization, oldest first.
	pub async fn for_organization(&self, organization_id: Uuid) -> Vec<Activity> {
		let entries = self.entries.read().await;
		entries
			.iter()
			.filter(|a| a.organization_id == organization_id)
			.cloned()
			.collect()
	}

	/// All entries referencing a project, oldest first.
	pub async fn for_project(&self, project_id: Uuid) -> Vec<Activity> {
		let entries = self.entries.read().await;
		entries
			.iter()
			.filter(|a| a.project_id == Some(project_id))
			.cloned()
			.collect()
	}

	/// All entries referencing a ticket, oldest first.
	pub async fn for_ticket(&self, ticket_id: Uuid) -> Vec<Activity> {
		let entries = self.entries.read().await;
		entries
			.iter()
			.filter(|a| a.ticket_id == Some(ticket_id))
			.cloned()
			.collect()
	}
}

impl Default for ActivityLog {
	fn default() -> Self {
		Self::new()
	}
}
