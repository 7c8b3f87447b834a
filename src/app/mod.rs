//! Application state, typed commands and the session that executes them.

pub mod session;
pub mod state;
pub mod view;

pub use session::Session;
pub use state::{AppState, Command, Event, reduce};
pub use view::{DisplayStatus, ViewModel, compute_view_model, display_list};
