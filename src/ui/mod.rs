//! Terminal UI for playing Connect Four against another person at the same
//! keyboard. Renders engine results; never decides outcomes itself.

mod app;
mod game_view;

pub use app::App;
