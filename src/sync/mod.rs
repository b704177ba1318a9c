mod http;
mod source;
mod synchronizer;

pub use http::HttpGraphSource;
pub use source::{FetchError, GraphSource, StaticSource};
pub use synchronizer::{FetchTicket, LoadState, SyncOutcome, Synchronizer};
