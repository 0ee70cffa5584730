pub mod routes;

pub use routes::RoutePath;
