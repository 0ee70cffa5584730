use std::fmt;

/// Destinations the host router knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutePath {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl RoutePath {
    pub fn path(&self) -> &'static str {
        match self {
            RoutePath::Login => "/",
            RoutePath::Bills => "#employee/bills",
            RoutePath::NewBill => "#employee/bill/new",
            RoutePath::Dashboard => "#admin/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [RoutePath::Login, RoutePath::Bills, RoutePath::NewBill, RoutePath::Dashboard]
            .into_iter()
            .find(|route| route.path() == path)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_back_to_routes() {
        assert_eq!(RoutePath::from_path("#employee/bills"), Some(RoutePath::Bills));
        assert_eq!(RoutePath::from_path("#employee/bill/new"), Some(RoutePath::NewBill));
        assert_eq!(RoutePath::from_path("/"), Some(RoutePath::Login));
        assert_eq!(RoutePath::from_path("#nowhere"), None);
    }
}
