//! Wire types for the external UI shell.

use serde::{Deserialize, Serialize};

use crate::model::ActionDescription;
use crate::suggestions::{Suggestion, SuggestionSource};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDto {
    pub kind: String,
    pub title: String,
    pub subtitle: String,
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyResponse {
    pub action: Option<ActionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchRequest {
    pub path: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchResponse {
    pub launched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestRequest {
    pub query: String,
    pub hour: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionDto {
    pub name: String,
    pub source: String,
    pub weight: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestResponse {
    pub suggestions: Vec<SuggestionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Classify(ClassifyRequest),
    Launch(LaunchRequest),
    Suggest(SuggestRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Classify(ClassifyResponse),
    Launch(LaunchResponse),
    Suggest(SuggestResponse),
}

impl From<ActionDescription> for ActionDto {
    fn from(value: ActionDescription) -> Self {
        Self {
            kind: value.kind.as_str().to_string(),
            title: value.title,
            subtitle: value.subtitle,
            payload: value.payload,
        }
    }
}

impl From<Suggestion> for SuggestionDto {
    fn from(value: Suggestion) -> Self {
        Self {
            name: value.name,
            source: match value.source {
                SuggestionSource::Frequent => "frequent",
                SuggestionSource::Recent => "recent",
                SuggestionSource::WorkHours => "work_hours",
                SuggestionSource::Evening => "evening",
            }
            .to_string(),
            weight: value.weight,
        }
    }
}
