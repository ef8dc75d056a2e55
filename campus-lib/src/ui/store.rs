//! Breadcrumb and toast store.

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::table::Notifier;

/// Most toasts shown at once; pushing another drops the oldest.
pub const MAX_TOASTS: usize = 5;

/// How long a notifier toast stays up before it dismisses itself.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Icon name.
    pub icon: String,
    /// Display label.
    pub label: String,
    /// Route path.
    pub path: String,
}

impl Breadcrumb {
    /// Creates a breadcrumb.
    pub fn new(icon: impl Into<String>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    /// Creates a toast stamped with the current time.
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// The shared UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub breadcrumbs: Vec<Breadcrumb>,
    pub toasts: Vec<Toast>,
    pub toasts_allowed: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            breadcrumbs: Vec::new(),
            toasts: Vec::new(),
            toasts_allowed: true,
        }
    }
}

/// Typed state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Replaces the breadcrumb trail.
    SetBreadcrumbs(Vec<Breadcrumb>),
    /// Shows a toast (ignored while toasts are suppressed).
    PushToast(Toast),
    /// Removes one toast.
    DismissToast(Uuid),
    /// Removes toasts created at or before the given instant.
    ExpireToasts(DateTime<Utc>),
    /// Removes all toasts.
    ClearToasts,
    /// Enables or suppresses toasts.
    SetToastsAllowed(bool),
}

impl UiState {
    /// Applies an action.
    pub fn reduce(&mut self, action: UiAction) {
        match action {
            UiAction::SetBreadcrumbs(breadcrumbs) => self.breadcrumbs = breadcrumbs,
            UiAction::PushToast(toast) => {
                if self.toasts_allowed {
                    self.toasts.push(toast);
                    let overflow = self.toasts.len().saturating_sub(MAX_TOASTS);
                    self.toasts.drain(..overflow);
                }
            }
            UiAction::DismissToast(id) => self.toasts.retain(|toast| toast.id != id),
            UiAction::ExpireToasts(cutoff) => self.toasts.retain(|toast| toast.created_at > cutoff),
            UiAction::ClearToasts => self.toasts.clear(),
            UiAction::SetToastsAllowed(allowed) => self.toasts_allowed = allowed,
        }
    }
}

/// Cloneable handle to the shared UI state.
#[derive(Debug, Clone)]
pub struct UiStore {
    state: watch::Sender<UiState>,
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UiStore {
    /// Creates a store with default state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self { state }
    }

    /// Applies an action and notifies subscribers.
    pub fn dispatch(&self, action: UiAction) {
        self.state.send_modify(|state| state.reduce(action));
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Drops every toast older than `max_age`.
    ///
    /// Hosts without a tokio runtime call this from their own tick, since
    /// notifier toasts only dismiss themselves when a runtime is available.
    pub fn expire_toasts(&self, max_age: Duration) {
        let cutoff = chrono::Duration::from_std(max_age)
            .ok()
            .and_then(|age| Utc::now().checked_sub_signed(age))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.dispatch(UiAction::ExpireToasts(cutoff));
    }

    fn toast(&self, level: ToastLevel, message: &str) {
        let toast = Toast::new(level, message);
        let id = toast.id;
        self.dispatch(UiAction::PushToast(toast));

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let state = self.state.clone();
            runtime.spawn(async move {
                tokio::time::sleep(TOAST_LIFETIME).await;
                state.send_modify(|state| state.reduce(UiAction::DismissToast(id)));
            });
        }
    }
}

impl Notifier for UiStore {
    fn notify_success(&self, message: &str) {
        log::info!("{}", message);
        self.toast(ToastLevel::Success, message);
    }

    fn notify_error(&self, message: &str) {
        log::warn!("{}", message);
        self.toast(ToastLevel::Error, message);
    }

    fn notify_warning(&self, message: &str) {
        log::warn!("{}", message);
        self.toast(ToastLevel::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumbs_replaced() {
        let store = UiStore::new();
        store.dispatch(UiAction::SetBreadcrumbs(vec![Breadcrumb::new(
            "school", "Schools", "/school",
        )]));
        store.dispatch(UiAction::SetBreadcrumbs(vec![
            Breadcrumb::new("school", "Schools", "/school"),
            Breadcrumb::new("edit", "Edit", "/school/edit/1"),
        ]));
        let state = store.state();
        assert_eq!(state.breadcrumbs.len(), 2);
        assert_eq!(state.breadcrumbs[1].path, "/school/edit/1");
    }

    #[test]
    fn test_notifier_pushes_toasts() {
        let store = UiStore::new();
        store.notify_success("Deleted school data");
        store.notify_warning("Deleting multiple rows is not supported yet");
        let state = store.state();
        assert_eq!(state.toasts.len(), 2);
        assert_eq!(state.toasts[0].level, ToastLevel::Success);
        assert_eq!(state.toasts[1].level, ToastLevel::Warning);
    }

    #[test]
    fn test_suppressed_toasts_are_dropped() {
        let store = UiStore::new();
        store.dispatch(UiAction::SetToastsAllowed(false));
        store.notify_error("Failed to load school data");
        assert!(store.state().toasts.is_empty());
    }

    #[test]
    fn test_dismiss_toast() {
        let store = UiStore::new();
        store.notify_error("one");
        store.notify_error("two");
        let first = store.state().toasts[0].id;
        store.dispatch(UiAction::DismissToast(first));
        let state = store.state();
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "two");
    }

    #[test]
    fn test_toasts_are_capped() {
        let store = UiStore::new();
        for i in 0..MAX_TOASTS + 2 {
            store.notify_error(&format!("failure {}", i));
        }
        let state = store.state();
        assert_eq!(state.toasts.len(), MAX_TOASTS);
        assert_eq!(state.toasts[0].message, "failure 2");
        assert_eq!(state.toasts[MAX_TOASTS - 1].message, format!("failure {}", MAX_TOASTS + 1));
    }

    #[test]
    fn test_expire_drops_old_toasts() {
        let mut state = UiState::default();
        let mut old = Toast::new(ToastLevel::Error, "old");
        old.created_at = Utc::now() - chrono::Duration::seconds(60);
        state.reduce(UiAction::PushToast(old));
        state.reduce(UiAction::PushToast(Toast::new(ToastLevel::Success, "fresh")));

        state.reduce(UiAction::ExpireToasts(Utc::now() - chrono::Duration::seconds(10)));

        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "fresh");
    }

    #[test]
    fn test_expire_toasts_by_age() {
        let store = UiStore::new();
        store.notify_success("Deleted school data");
        store.expire_toasts(Duration::from_secs(60));
        assert_eq!(store.state().toasts.len(), 1);
        store.expire_toasts(Duration::ZERO);
        assert!(store.state().toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifier_toasts_dismiss_themselves() {
        let store = UiStore::new();
        store.notify_success("Deleted school data");
        tokio::time::sleep(TOAST_LIFETIME / 2).await;
        store.notify_error("Failed to delete school");
        assert_eq!(store.state().toasts.len(), 2);

        tokio::time::sleep(TOAST_LIFETIME / 2 + Duration::from_millis(1)).await;
        let state = store.state();
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "Failed to delete school");

        tokio::time::sleep(TOAST_LIFETIME).await;
        assert!(store.state().toasts.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = UiStore::new();
        let mut rx = store.subscribe();
        store.dispatch(UiAction::ClearToasts);
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();
        assert!(!rx.has_changed().unwrap());
    }
}
