//! Msgboard core: data model, error taxonomy, and reactive async state.
mod classify;
mod error;
mod message;
mod state;

pub use classify::classify;
pub use error::{ApiError, ApiFailure};
pub use message::{postable_content, HelloResponse, Message, CONTENT_LIMIT};
pub use state::{AsyncCell, AsyncState, Subscription};
