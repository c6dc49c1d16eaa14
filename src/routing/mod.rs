pub mod pattern;
pub mod registry;
pub mod spec;

pub use pattern::{PathPattern, PatternError};
pub use registry::{RegistryError, RouteMatch, RouteRegistry, RouteRegistryBuilder};
pub use spec::{HandlerFuture, MatchedRoute, RouteHandler, RouteSpec};
