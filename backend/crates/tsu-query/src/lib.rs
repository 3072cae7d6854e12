//! Minimal TeamSpeak 3 ServerQuery client.
//!
//! Only what the updater needs: connect, read the greeting, run a command,
//! parse the reply. Lines on the wire end with `\n\r`.

pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod escape;
pub(crate) mod reply;


pub use client::QueryClient;
pub use error::{QueryError, Result as QueryResult};
pub use escape::unescape;
pub use reply::{Record, ServerVersion, parse_records};
