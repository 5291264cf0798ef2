//! Navigator for a terminal session.

use tracing::debug;

use nexus_core::Navigator;

/// There is no view to switch in a terminal; transitions are logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        debug!(path, "Route changed");
    }
}
