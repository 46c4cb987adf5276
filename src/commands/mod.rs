// ABOUTME: Command handlers wiring configuration, runtime, and the update core.
// ABOUTME: One module per subcommand, plus shared runtime connection.

mod activate;
mod runtime_connection;
mod status;

pub use activate::{activate, update};
pub use status::status;
