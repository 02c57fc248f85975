//! View models and navigation
//!
//! `BlogApp` owns one `PostListView` and one `NewPostView` and switches
//! between them. A successful create navigates to the list and refreshes it;
//! anything else keeps the user on the form with the draft intact.

use crate::api::{CreateOutcome, FieldErrors, Post, PostsClient};
use crate::draft::{DraftField, DraftState};
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    PostList,
    NewPost,
}

#[derive(Debug, Default)]
pub struct PostListView {
    posts: Vec<Post>,
}

impl PostListView {
    /// Replace the whole collection on success; keep the previous one on
    /// failure and hand the error back.
    pub fn apply(&mut self, result: Result<Vec<Post>>) -> Result<()> {
        match result {
            Ok(posts) => {
                self.posts = posts;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, kept = self.posts.len(), "Post list refresh failed");
                Err(e)
            }
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// One `"<title> - <content>"` line per post
    pub fn lines(&self) -> Vec<String> {
        self.posts
            .iter()
            .map(|p| format!("{} - {}", p.title, p.content))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct NewPostView {
    state: DraftState,
    errors: FieldErrors,
    unauthorized: bool,
}

impl NewPostView {
    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_unauthorized(&self) -> bool {
        self.unauthorized
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) {
        self.state = self.state.edit(field, value);
    }
}

pub struct BlogApp {
    client: PostsClient,
    route: Route,
    list: PostListView,
    form: NewPostView,
}

impl BlogApp {
    pub fn new(client: PostsClient) -> Self {
        Self {
            client,
            route: Route::PostList,
            list: PostListView::default(),
            form: NewPostView::default(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn list(&self) -> &PostListView {
        &self.list
    }

    pub fn form(&self) -> &NewPostView {
        &self.form
    }

    /// Re-fetch the post list
    pub async fn refresh(&mut self) -> Result<()> {
        let result = self.client.list_posts().await;
        self.list.apply(result)
    }

    /// Navigate to a fresh new-post form
    pub fn open_new_post(&mut self) {
        self.form = NewPostView::default();
        self.route = Route::NewPost;
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) {
        self.form.edit(field, value);
    }

    /// Submit the current draft.
    ///
    /// Transport errors and unexpected statuses leave the form untouched.
    /// A form that was already submitted sends nothing and returns
    /// `ClientError::AlreadySubmitted`.
    pub async fn submit(&mut self) -> Result<CreateOutcome> {
        let Some(draft) = self.form.state.draft() else {
            return Err(ClientError::AlreadySubmitted);
        };

        let outcome = self.client.create_post(&draft).await?;
        match &outcome {
            CreateOutcome::Created(_) => {
                self.form = NewPostView {
                    state: DraftState::Submitted,
                    ..NewPostView::default()
                };
                self.route = Route::PostList;
                if let Err(e) = self.refresh().await {
                    tracing::warn!(error = %e, "List refresh after create failed");
                }
            }
            CreateOutcome::Invalid(errors) => {
                self.form.errors = errors.clone();
                self.form.unauthorized = false;
            }
            CreateOutcome::Unauthorized => {
                self.form.errors.clear();
                self.form.unauthorized = true;
            }
        }

        Ok(outcome)
    }
}
