pub mod route;
pub mod tract;

pub use route::{HeadwayFlags, RoutePathPoint};
pub use tract::TractLabel;
