use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a server-side task. Passed to the server verbatim.
/// The server lists ids as JSON numbers, so both numbers and strings decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!("invalid task id: {other}"))),
        }
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,

    #[serde(default)]
    pub high_description: Option<String>,
    #[serde(default)]
    pub high_points: u32,
    #[serde(default)]
    pub medium_description: Option<String>,
    #[serde(default)]
    pub medium_points: u32,
    #[serde(default)]
    pub low_description: Option<String>,
    #[serde(default)]
    pub low_points: u32,

    #[serde(default)]
    pub effort_type: Option<String>,
    #[serde(default)]
    pub location_type: Option<String>,
}

impl Task {
    pub fn points(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Low => self.low_points,
            Tier::Medium => self.medium_points,
            Tier::High => self.high_points,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

impl TaskFilter {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskListResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
}
