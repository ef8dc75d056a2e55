//! Remote entity tables.
//!
//! - [`ListController`] - paginated, debounced, sortable list state
//! - [`SelectionModel`] - selected row ids
//! - [`BulkActionCoordinator`] - single and bulk deletion
//! - [`Column`] - declarative column descriptors

mod bulk;
mod column;
mod config;
mod controller;
mod fetcher;
mod notify;
pub mod render;
mod selection;
mod state;

pub use bulk::BulkActionCoordinator;
pub use bulk::BulkOutcome;
pub use bulk::DeleteFailure;
pub use column::CellValue;
pub use column::Column;
pub use column::find_column;
pub use column::sorted_order;
pub use config::BulkMode;
pub use config::SelectionPolicy;
pub use config::TableConfig;
pub use controller::ListController;
pub use controller::ListControllerBuilder;
pub use fetcher::DeleteFetcher;
pub use fetcher::ListFetcher;
pub use notify::LogNotifier;
pub use notify::Notifier;
pub use selection::HeaderCheckbox;
pub use selection::SelectionModel;
pub use state::FetchState;
pub use state::Pager;
pub use state::TableSnapshot;
