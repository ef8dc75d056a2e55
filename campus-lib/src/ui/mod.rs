//! Shared dashboard UI state.
//!
//! Breadcrumbs and toasts live in one [`UiStore`] that screens receive
//! explicitly. State only changes through [`UiAction`]s, and every change is
//! observable through [`UiStore::subscribe`]. At most [`MAX_TOASTS`] toasts are
//! kept, and notifier toasts dismiss themselves after [`TOAST_LIFETIME`].

mod store;

pub use store::Breadcrumb;
pub use store::MAX_TOASTS;
pub use store::TOAST_LIFETIME;
pub use store::Toast;
pub use store::ToastLevel;
pub use store::UiAction;
pub use store::UiState;
pub use store::UiStore;
