//! The view session tying the core together: state, endpoints, archives,
//! style composition, and the last-state-wins recomposition flow.

mod session;

pub use session::{ComposedView, ViewError, ViewSession};
