//! Task data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lowest allowed task priority value (most urgent).
pub const PRIORITY_MIN: i32 = 1;
/// Highest allowed task priority value (least urgent).
pub const PRIORITY_MAX: i32 = 3;
/// Status assigned to every freshly generated task.
pub const DEFAULT_TASK_STATUS: &str = "todo";

/// Force a proposed priority into the `[PRIORITY_MIN, PRIORITY_MAX]` range.
pub const fn clamp_priority(value: i32) -> i32 {
    if value < PRIORITY_MIN {
        PRIORITY_MIN
    } else if value > PRIORITY_MAX {
        PRIORITY_MAX
    } else {
        value
    }
}

/// Persisted task belonging to one idea.
///
/// Tasks are created in batches by the task generator; ordering within a
/// batch follows the order the upstream model emitted them, not priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier.
    pub id: Uuid,
    /// Owning idea.
    pub idea_id: Uuid,
    /// Short action description.
    pub title: String,
    /// Longer free-text detail, possibly empty.
    pub description: String,
    /// Urgency in `[1, 3]`, whatever the upstream model proposed.
    pub priority: i32,
    /// Free-text workflow state, `"todo"` on creation.
    pub status: String,
    /// Record creation timestamp; orders the batch.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for one task in a generated batch.
///
/// The constructor clamps the priority, so a draft can never carry an
/// out-of-range value into the datastore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    priority: i32,
}

impl TaskDraft {
    /// Build a draft, clamping `priority` into the allowed range.
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: i32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: clamp_priority(priority),
        }
    }

    /// Short action description.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Longer free-text detail.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Clamped urgency value.
    pub const fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(9, 3)]
    #[case(4, 3)]
    #[case(0, 1)]
    #[case(-7, 1)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 3)]
    fn clamps_priority_at_both_bounds(#[case] proposed: i32, #[case] expected: i32) {
        assert_eq!(clamp_priority(proposed), expected);
        assert_eq!(TaskDraft::new("t", "", proposed).priority(), expected);
    }

    #[test]
    fn task_serialises_camel_case() {
        let task = Task {
            id: Uuid::nil(),
            idea_id: Uuid::nil(),
            title: "Research market".into(),
            description: String::new(),
            priority: 1,
            status: DEFAULT_TASK_STATUS.into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&task).expect("serialise task");
        assert_eq!(value["status"], "todo");
        assert!(value.get("ideaId").is_some());
    }
}
