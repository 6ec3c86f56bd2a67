//! Request body shapes for the blog routes.
//!
//! Bodies arrive as untyped JSON and are checked here before any store work
//! happens. Unknown keys are ignored; every listed field must be present and
//! be a string.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("input does not match {shape}: {reason}")]
pub struct InputError {
    pub shape: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostInput {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// A body shape that can be checked against an arbitrary JSON value
pub trait InputShape: DeserializeOwned {
    const NAME: &'static str;

    fn safe_parse(body: &Value) -> Result<Self, InputError> {
        if !body.is_object() {
            return Err(InputError {
                shape: Self::NAME,
                reason: "expected a JSON object".to_string(),
            });
        }
        Self::deserialize(body).map_err(|e| InputError {
            shape: Self::NAME,
            reason: e.to_string(),
        })
    }
}

impl InputShape for CreatePostInput {
    const NAME: &'static str = "createPostInput";
}

impl InputShape for UpdatePostInput {
    const NAME: &'static str = "updatePostInput";
}
