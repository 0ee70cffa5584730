use crate::constants::RoutePath;

/// Host router hook; re-renders the destination view synchronously
pub trait Navigator: Send + Sync {
    fn on_navigate(&self, route: RoutePath);
}

/// Blocking user-facing notice, like `window.alert`
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

impl<F> Navigator for F
where
    F: Fn(RoutePath) + Send + Sync,
{
    fn on_navigate(&self, route: RoutePath) {
        self(route)
    }
}
