//! Static route tables and the navigation guard.

mod guard;
mod table;

pub use guard::{Navigation, NavigationGuard};
pub use table::{RouteDescriptor, RouteMatch, RouteTable};
