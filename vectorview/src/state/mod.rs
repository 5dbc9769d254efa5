//! View state and its URL-fragment codec.

mod codec;
mod types;

pub use codec::{decode, encode};
pub use types::{TileSourceRef, ViewState, DEFAULT_LANGUAGE};
