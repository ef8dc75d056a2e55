//! Collaborator contracts the table controllers depend on.

use async_trait::async_trait;

use crate::error::Error;
use crate::model::ListQuery;
use crate::model::PageData;

/// Fetches one page of a resource list.
///
/// Timeouts are the implementation's business; the controller waits for
/// as long as the returned future takes.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use campus_lib::error::Error;
/// use campus_lib::model::{ListQuery, PageData, PageMeta, School};
/// use campus_lib::table::ListFetcher;
///
/// struct Fixed(Vec<School>);
///
/// #[async_trait]
/// impl ListFetcher<School> for Fixed {
///     async fn list(&self, query: &ListQuery) -> Result<PageData<School>, Error> {
///         let meta = PageMeta::from_total(query.page, query.limit, self.0.len() as u32);
///         Ok(PageData::new(self.0.clone(), meta))
///     }
/// }
/// ```
#[async_trait]
pub trait ListFetcher<T>: Send + Sync {
    /// Fetches the rows matching `query`'s search, page and limit.
    async fn list(&self, query: &ListQuery) -> Result<PageData<T>, Error>;
}

/// Deletes one row by id.
#[async_trait]
pub trait DeleteFetcher: Send + Sync {
    /// Deletes the row with the given id.
    ///
    /// `Ok(false)` means the server answered but reported no success.
    async fn delete_one(&self, id: &str) -> Result<bool, Error>;
}
