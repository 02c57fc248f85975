//! HTTP calls against the posts endpoints
//!
//! Every outcome the server can produce for a create is surfaced as a
//! `CreateOutcome` variant; transport failures and unexpected statuses are
//! `ClientError`s.

use crate::config::ClientConfig;
use crate::csrf::CsrfToken;
use crate::draft::PostDraft;
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{redirect, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SESSION_COOKIE: &str = "_blog_session";
pub const CSRF_HEADER: &str = "X-CSRF-Token";
const POSTS_PATH: &str = "/api/v1/posts";
const APP_PATH: &str = "/app";

/// Field name -> violation messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Post),
    Invalid(FieldErrors),
    Unauthorized,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    post: &'a PostDraft,
}

pub struct PostsClient {
    http: reqwest::Client,
    config: ClientConfig,
    csrf: Option<CsrfToken>,
}

impl PostsClient {
    /// Build a client without fetching the page shell
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(session) = &config.session {
            let cookie = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, session))
                .map_err(|e| ClientError::Config(format!("invalid session token: {e}")))?;
            headers.insert(COOKIE, cookie);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            config,
            csrf: None,
        })
    }

    /// Build a client and read the anti-forgery token from the page shell.
    ///
    /// Anonymous sessions get a page without a token; the client still
    /// connects and the server answers writes with 401.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config)?;

        let resp = client.http.get(client.config.url(APP_PATH)).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::UnexpectedStatus(resp.status().as_u16()));
        }

        let html = resp.text().await?;
        match CsrfToken::from_page(&html) {
            Ok(token) => client.csrf = Some(token),
            Err(ClientError::MissingCsrfToken) => {
                tracing::debug!("Page shell carried no CSRF token; session is anonymous");
            }
            Err(e) => return Err(e),
        }

        Ok(client)
    }

    pub fn csrf_token(&self) -> Option<&CsrfToken> {
        self.csrf.as_ref()
    }

    /// Fetch the signed-in user's posts
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let resp = self.http.get(self.config.url(POSTS_PATH)).send().await?;

        match resp.status() {
            StatusCode::OK => {
                let posts: Vec<Post> = resp.json().await?;
                tracing::debug!(count = posts.len(), "Fetched posts");
                Ok(posts)
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            status => Err(ClientError::UnexpectedStatus(status.as_u16())),
        }
    }

    /// Submit `draft` as a new post
    pub async fn create_post(&self, draft: &PostDraft) -> Result<CreateOutcome> {
        let mut req = self
            .http
            .post(self.config.url(POSTS_PATH))
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&CreateBody { post: draft });
        if let Some(token) = &self.csrf {
            req = req.header(CSRF_HEADER, token.as_str());
        }

        let resp = req.send().await?;

        match resp.status() {
            StatusCode::CREATED => {
                let post: Post = resp.json().await?;
                tracing::info!(post_id = post.id, "Post created");
                Ok(CreateOutcome::Created(post))
            }
            StatusCode::BAD_REQUEST => {
                let body: serde_json::Value = resp.json().await?;
                let errors: FieldErrors = serde_json::from_value(body)
                    .map_err(|_| ClientError::UnexpectedStatus(StatusCode::BAD_REQUEST.as_u16()))?;
                Ok(CreateOutcome::Invalid(errors))
            }
            StatusCode::UNAUTHORIZED => Ok(CreateOutcome::Unauthorized),
            status => Err(ClientError::UnexpectedStatus(status.as_u16())),
        }
    }
}
