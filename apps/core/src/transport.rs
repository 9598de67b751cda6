use serde::{Deserialize, Serialize};

use crate::contract::{
    ClassifyResponse, CoreRequest, CoreResponse, LaunchResponse, SuggestResponse,
};
use crate::interpreters;
use crate::launch;
use crate::suggestions;
use crate::usage_store::UsageStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    Launch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(store: &UsageStore, request: CoreRequest) -> TransportResponse {
    match request {
        CoreRequest::Classify(classify) => TransportResponse::Ok {
            response: CoreResponse::Classify(ClassifyResponse {
                action: interpreters::classify(&classify.query).map(Into::into),
            }),
        },
        CoreRequest::Launch(launch_request) => match launch::open_path(&launch_request.path) {
            Ok(()) => {
                if let Some(name) = &launch_request.name {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_secs() as i64)
                        .unwrap_or(0);
                    if let Err(error) = store.record_launch(name, "app", now) {
                        crate::logging::warn(&format!("usage record failed: {error}"));
                    }
                }
                TransportResponse::Ok {
                    response: CoreResponse::Launch(LaunchResponse { launched: true }),
                }
            }
            Err(error) => TransportResponse::Err {
                error: ErrorResponse {
                    code: ErrorCode::Launch,
                    message: error.to_string(),
                },
            },
        },
        CoreRequest::Suggest(suggest) => TransportResponse::Ok {
            response: CoreResponse::Suggest(SuggestResponse {
                suggestions: suggestions::suggestions_for(store, &suggest.query, suggest.hour)
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            }),
        },
    }
}

pub fn handle_json(store: &UsageStore, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(store, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}
