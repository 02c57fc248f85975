/// Data models for blog-service
///
/// - `Post`: persisted record, also the wire representation
/// - `PostParams`: client-supplied candidate (title and content only)
/// - `NewPost`: validated insert record with a server-assigned owner
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Field name -> violation messages, as returned with a 400
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate post submitted by a client.
///
/// Anything besides `title` and `content` (notably `owner_id`) is ignored.
/// Missing and `null` fields deserialize as empty strings so they surface as
/// validation errors rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct PostParams {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_presence"))]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_presence"))]
    pub content: String,
}

/// Create payload: `{"post": {...}}` or the flat params object
///
/// A body carrying a `post` key is always read as the wrapped form, so a
/// mistyped field inside it is a parse error rather than a blank flat body.
#[derive(Debug, Clone)]
pub enum CreatePostRequest {
    Wrapped { post: PostParams },
    Flat(PostParams),
}

impl<'de> Deserialize<'de> for CreatePostRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let mut body = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        match body.remove("post") {
            Some(post) => serde_json::from_value(post)
                .map(|post| CreatePostRequest::Wrapped { post })
                .map_err(|e| D::Error::custom(format!("post: {e}"))),
            None => serde_json::from_value(serde_json::Value::Object(body))
                .map(CreatePostRequest::Flat)
                .map_err(D::Error::custom),
        }
    }
}

impl CreatePostRequest {
    pub fn into_params(self) -> PostParams {
        match self {
            CreatePostRequest::Wrapped { post } => post,
            CreatePostRequest::Flat(params) => params,
        }
    }
}

/// Validated insert record
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub owner_id: i64,
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// Validate `params` and attach the owner.
    pub fn from_params(owner_id: i64, params: PostParams) -> Result<Self, ValidationErrors> {
        params.validate()?;
        Ok(Self {
            owner_id,
            title: params.title,
            content: params.content,
        })
    }
}

const BLANK_MESSAGE: &str = "can't be blank";

fn validate_presence(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed(BLANK_MESSAGE));
        return Err(err);
    }
    Ok(())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flatten validator output into the field -> messages map
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
