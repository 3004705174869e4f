//! Msgboard client: HTTP transport, reactive stores, and call gating.
mod gate;
mod store;
mod transport;

pub use gate::{Debouncer, LazyLoader, Throttler};
pub use store::{HelloStore, MessageStore};
pub use transport::{ClientBuildError, ClientSettings, MessageApi, ReqwestApi, RequestOptions};
