//! Idea data model.
//!
//! An idea anchors a message thread and a task list. Messages and tasks
//! reference an idea's id and nothing else; deleting an idea cascades to
//! both (see `IdeaCatalogue`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted idea record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Idea identifier.
    pub id: Uuid,
    /// Short headline for the idea.
    pub title: String,
    /// Free-text description used as model context.
    pub description: String,
    /// Ordered labels attached at creation time.
    pub tags: Vec<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validation errors returned by [`IdeaDraft::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaValidationError {
    EmptyTitle,
    EmptyDescription,
}

impl fmt::Display for IdeaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
        }
    }
}

impl std::error::Error for IdeaValidationError {}

/// Validated fields for creating an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    title: String,
    description: String,
    tags: Vec<String>,
}

impl IdeaDraft {
    /// Validate and construct a draft. Tag order is preserved as given.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Result<Self, IdeaValidationError> {
        let title = title.into();
        let description = description.into();
        if title.trim().is_empty() {
            return Err(IdeaValidationError::EmptyTitle);
        }
        if description.trim().is_empty() {
            return Err(IdeaValidationError::EmptyDescription);
        }
        Ok(Self {
            title,
            description,
            tags,
        })
    }

    /// Idea headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Idea description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Tags in submission order.
    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a description", IdeaValidationError::EmptyTitle)]
    #[case("   ", "a description", IdeaValidationError::EmptyTitle)]
    #[case("a title", "", IdeaValidationError::EmptyDescription)]
    #[case("a title", "  \n ", IdeaValidationError::EmptyDescription)]
    fn draft_rejects_blank_required_fields(
        #[case] title: &str,
        #[case] description: &str,
        #[case] expected: IdeaValidationError,
    ) {
        let err = IdeaDraft::new(title, description, vec![]).expect_err("draft must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn draft_preserves_tag_order() {
        let draft = IdeaDraft::new("t", "d", vec!["x".into(), "y".into()]).expect("valid draft");
        assert_eq!(draft.tags(), ["x", "y"]);
    }

    #[test]
    fn idea_serialises_camel_case_timestamps() {
        let idea = Idea {
            id: Uuid::nil(),
            title: "t".into(),
            description: "d".into(),
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&idea).expect("serialise idea");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
