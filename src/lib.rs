pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod history;
pub mod markup;
pub mod models;
pub mod page;
pub mod projects;
pub mod source;
pub mod state;
pub mod ui;
pub mod year;

pub use app::router;
pub use config::Config;
pub use dashboard::{Dashboard, RenderContext, RenderOutcome};
pub use state::AppState;
