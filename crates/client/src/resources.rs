//! Generic CRUD client for every backend resource.

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use stockdesk_core::{DomainError, RecordId};
use stockdesk_inventory::{Category, Draft, Resource};

use crate::backend::HttpBackend;
use crate::session::SessionManager;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not signed in")]
    NotAuthenticated,

    /// The backend answered 401. The session was logged out unless a newer
    /// login had already replaced the rejected token.
    #[error("session rejected by the backend; signed out")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("{resource} request failed ({status}): {body}")]
    Status {
        resource: &'static str,
        status: u16,
        body: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// List/get/create/update/delete for one resource type, authorized with the
/// session's access token.
///
/// Failures are returned to the caller untouched otherwise: no retries, no
/// local state to roll back. A 401 ends the session.
pub struct ResourceClient<R> {
    backend: Arc<HttpBackend>,
    session: Arc<SessionManager>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            session: self.session.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(backend: Arc<HttpBackend>, session: Arc<SessionManager>) -> Self {
        Self {
            backend,
            session,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.list_with(&[]).await
    }

    pub async fn list_with(&self, query: &[(&str, &str)]) -> Result<Vec<R>, ApiError> {
        let req = self.backend.client().get(self.backend.url(R::PATH)).query(query);
        let items: Vec<R> = Self::parse(self.send(req).await?).await?;
        debug!(resource = R::NAME, count = items.len(), "listed");
        Ok(items)
    }

    pub async fn get(&self, id: RecordId) -> Result<R, ApiError> {
        let req = self.backend.client().get(self.backend.url(&R::item_path(id)));
        Self::parse(self.send(req).await?).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        draft.validate()?;
        let req = self.backend.client().post(self.backend.url(R::PATH)).json(draft);
        let created: R = Self::parse(self.send(req).await?).await?;
        debug!(resource = R::NAME, id = %created.id(), "created");
        Ok(created)
    }

    pub async fn update(&self, id: RecordId, draft: &R::Draft) -> Result<R, ApiError> {
        draft.validate()?;
        let req = self
            .backend
            .client()
            .put(self.backend.url(&R::item_path(id)))
            .json(draft);
        let updated: R = Self::parse(self.send(req).await?).await?;
        debug!(resource = R::NAME, %id, "updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        let req = self
            .backend
            .client()
            .delete(self.backend.url(&R::item_path(id)));
        self.send(req).await?;
        debug!(resource = R::NAME, %id, "deleted");
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.session.bearer_token().ok_or(ApiError::NotAuthenticated)?;

        let resp = req
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                warn!(resource = R::NAME, error = %e, "request failed");
                ApiError::Network(e.to_string())
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            // A reply to a token that a newer login has replaced must not
            // end the newer session.
            self.session.handle_rejected_token(&token).await;
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(resource = R::NAME, status = status.as_u16(), %body, "request rejected");
            return Err(ApiError::Status {
                resource: R::NAME,
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    async fn parse<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| {
            warn!(resource = R::NAME, error = %e, "unexpected response body");
            ApiError::Parse(e.to_string())
        })
    }
}

impl ResourceClient<Category> {
    /// Categories with `product_count` filled in.
    pub async fn list_with_counts(&self) -> Result<Vec<Category>, ApiError> {
        self.list_with(&Category::WITH_COUNTS).await
    }
}
