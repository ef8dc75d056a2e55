//! Web API operations
//!
//! Every dashboard resource exposes the same two endpoints:
//!
//! - `POST /<resource>/find` with `{search, page, limit}` lists one page
//! - `DELETE /<resource>` with `{id}` deletes one record
//!
//! [`RemoteResource`] implements both table collaborator contracts on top of
//! them.

mod resource;
mod wire;

pub use resource::RemoteResource;
pub use resource::Resource;
pub use wire::*;
