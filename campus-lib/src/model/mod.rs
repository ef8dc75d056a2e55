//! Data models
//!
//! - [`Row`] - trait every listed record implements
//! - [`ListQuery`] - the list request intent (search, page, limit, sort)
//! - [`PageMeta`] / [`PageData`] - one fetched page and its pagination info
//! - Row records for each dashboard resource

mod admin;
mod log;
mod order;
mod page;
mod query;
mod school;
mod score;
mod student;

pub use admin::Admin;
pub use log::LogEntry;
pub use order::Direction;
pub use order::SortOrder;
pub use page::PageData;
pub use page::PageMeta;
pub use query::ListQuery;
pub use school::Image;
pub use school::School;
pub use score::Score;
pub use student::SchoolRef;
pub use student::Student;

/// A record that can be listed in a table.
///
/// The controller never inspects anything but the id, which must be unique
/// within the resource. Selection is keyed by it.
pub trait Row: Clone + Send + Sync + 'static {
    /// Returns the unique identifier of this row.
    fn id(&self) -> &str;
}
