//! HTTP collaborators for entity tables.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::wire::DeleteRequest;
use super::wire::FindRequest;
use super::wire::FindResponse;
use super::wire::SuccessResponse;
use super::wire::parse_body;
use crate::CampusClient;
use crate::error::Error;
use crate::model::ListQuery;
use crate::model::PageData;
use crate::table::DeleteFetcher;
use crate::table::ListFetcher;

/// A listable, deletable API resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Path segment, e.g. `school`.
    pub path: &'static str,
    /// Human label used in notifications.
    pub label: &'static str,
}

impl Resource {
    pub const SCHOOL: Resource = Resource::new("school", "school");
    pub const STUDENT: Resource = Resource::new("student", "student");
    pub const SCORE: Resource = Resource::new("score", "score");
    pub const ADMIN: Resource = Resource::new("admin", "admin");
    pub const LOG: Resource = Resource::new("log", "activity");

    /// Creates a resource descriptor.
    pub const fn new(path: &'static str, label: &'static str) -> Self {
        Self { path, label }
    }

    /// Returns the list endpoint path.
    pub fn find_path(&self) -> String {
        format!("{}/find", self.path)
    }
}

/// One resource of the campus API, typed by its row record.
///
/// Implements [`ListFetcher`] over `POST /<resource>/find` and
/// [`DeleteFetcher`] over `DELETE /<resource>`.
pub struct RemoteResource<T> {
    client: CampusClient,
    resource: Resource,
    _row: PhantomData<fn() -> T>,
}

impl<T> Clone for RemoteResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            resource: self.resource,
            _row: PhantomData,
        }
    }
}

impl<T> RemoteResource<T> {
    pub(crate) fn new(client: CampusClient, resource: Resource) -> Self {
        Self {
            client,
            resource,
            _row: PhantomData,
        }
    }

    /// Returns the resource descriptor.
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

#[async_trait]
impl<T> ListFetcher<T> for RemoteResource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn list(&self, query: &ListQuery) -> Result<PageData<T>, Error> {
        let url = self.client.endpoint(&self.resource.find_path())?;
        let body = self
            .client
            .send_json(Method::POST, url, &FindRequest::from(query))
            .await?;
        let response: FindResponse<T> = parse_body(&body)?;
        Ok(response.into())
    }
}

#[async_trait]
impl<T> DeleteFetcher for RemoteResource<T>
where
    T: Send + 'static,
{
    async fn delete_one(&self, id: &str) -> Result<bool, Error> {
        let url = self.client.endpoint(self.resource.path)?;
        let body = self
            .client
            .send_json(Method::DELETE, url, &DeleteRequest { id })
            .await?;
        let response: SuccessResponse = parse_body(&body)?;
        if !response.success {
            log::warn!(
                "{}: delete of {} reported no success: {}",
                self.resource.label,
                id,
                response.message.as_deref().unwrap_or("no message")
            );
        }
        Ok(response.success)
    }
}
