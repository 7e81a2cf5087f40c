//! Turning an idea plus unstructured model output into validated task drafts.
//!
//! The upstream model is asked for a JSON array but is not contractually
//! bound to return one, so extraction is two-stage: a strict parse of the
//! whole reply first, then the earliest bracketed or braced span (greedy to
//! the last matching close). Failures are tagged so callers can tell "no
//! JSON at all" from "JSON of the wrong shape".

use serde_json::Value;

use crate::domain::idea::Idea;
use crate::domain::task::TaskDraft;

/// System turn preceding the instruction prompt.
pub const TASK_SYSTEM_PROMPT: &str = "You are an assistant that returns ONLY valid JSON when asked.";

/// Token budget for generation calls. Larger than chat because the whole
/// batch must fit in one reply.
pub const TASK_MAX_TOKENS: u32 = 1200;

/// Sampling temperature for generation calls. Lower than chat because
/// structural compliance matters more than creativity here.
pub const TASK_TEMPERATURE: f32 = 0.2;

/// Upper bound on how many elements of the model's array are honoured.
pub const MAX_GENERATED_TASKS: usize = 50;

/// Title substituted when the model omits one.
const DEFAULT_TITLE: &str = "Untitled";

/// Priority substituted when the model's value is missing or non-numeric.
const DEFAULT_PRIORITY: i32 = 3;

/// Build the deterministic instruction prompt for one generation run.
pub fn build_task_prompt(idea: &Idea, num_tasks: u32) -> String {
    format!(
        "Given the idea below, return EXACTLY {num_tasks} tasks as a JSON array. \
Each task must be an object with keys:
- title (string)
- description (string)
- priority (integer 1-3)

Return ONLY the JSON array with no extra commentary.

Idea Title: {title}
Description: {description}

Example:
[
  {{ \"title\":\"Research market\", \"description\":\"Do market research...\", \"priority\":1 }}
]",
        title = idea.title,
        description = idea.description,
    )
}

/// Tagged failures from reply interpretation, so callers can branch on the
/// stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskParseError {
    /// The reply contains no bracketed or braced span at all.
    #[error("no JSON value found in model reply")]
    NoJson,
    /// A span was found but is not valid JSON.
    #[error("extracted span is not valid JSON: {message}")]
    InvalidJson { message: String },
    /// The reply parsed, but the value is not an array.
    #[error("model reply is valid JSON but not an array")]
    NotAnArray,
}

impl From<TaskParseError> for crate::domain::Error {
    fn from(error: TaskParseError) -> Self {
        match &error {
            TaskParseError::NoJson | TaskParseError::InvalidJson { .. } => {
                crate::domain::Error::unparsable_model_reply("Failed to parse JSON from model")
                    .with_details(serde_json::json!({ "stage": "extraction", "reason": error.to_string() }))
            }
            TaskParseError::NotAnArray => {
                crate::domain::Error::unexpected_model_shape("Model did not return an array")
                    .with_details(serde_json::json!({ "stage": "shape" }))
            }
        }
    }
}

/// Extract the first JSON value from a possibly-noisy reply.
///
/// Strict whole-string parse first; on failure, the earliest `[`- or
/// `{`-opened span, taken greedily to the last matching close.
pub fn extract_first_json(text: &str) -> Result<Value, TaskParseError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    let span = bracketed_span(text).ok_or(TaskParseError::NoJson)?;
    serde_json::from_str(span).map_err(|err| TaskParseError::InvalidJson {
        message: err.to_string(),
    })
}

/// The earliest bracketed or braced span, or `None` when neither bracket
/// pair occurs in order.
fn bracketed_span(text: &str) -> Option<&str> {
    let array = span_between(text, '[', ']');
    let object = span_between(text, '{', '}');
    match (array, object) {
        (Some((array_start, array_span)), Some((object_start, object_span))) => {
            if array_start < object_start {
                Some(array_span)
            } else {
                Some(object_span)
            }
        }
        (Some((_, span)), None) | (None, Some((_, span))) => Some(span),
        (None, None) => None,
    }
}

fn span_between(text: &str, open: char, close: char) -> Option<(usize, &str)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    // Both delimiters are ASCII, so the inclusive range ends on a char boundary.
    text.get(start..=end).map(|span| (start, span))
}

/// Validate a parsed reply into at most [`MAX_GENERATED_TASKS`] drafts,
/// preserving array order.
pub fn drafts_from_value(value: &Value) -> Result<Vec<TaskDraft>, TaskParseError> {
    let elements = value.as_array().ok_or(TaskParseError::NotAnArray)?;
    Ok(elements
        .iter()
        .take(MAX_GENERATED_TASKS)
        .map(draft_from_element)
        .collect())
}

fn draft_from_element(element: &Value) -> TaskDraft {
    let title = coerce_text(element.get("title"), DEFAULT_TITLE);
    let description = coerce_text(element.get("description"), "");
    let priority = coerce_priority(element.get("priority"));
    TaskDraft::new(title, description, priority)
}

/// Scalars become their string rendering; anything else takes the default.
fn coerce_text(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => default.to_owned(),
    }
}

/// Numbers and numeric strings are honoured (rounded to the nearest
/// integer); anything else takes the default. Clamping happens in
/// [`TaskDraft::new`].
fn coerce_priority(value: Option<&Value>) -> i32 {
    let numeric = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match numeric {
        Some(number) if number.is_finite() => {
            // Clamp before the cast so extreme values cannot wrap.
            number.clamp(f64::from(i32::MIN), f64::from(i32::MAX)).round() as i32
        }
        _ => DEFAULT_PRIORITY,
    }
}
