pub mod app;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod presenter;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Settings;
pub use dashboard::Dashboard;
pub use fetcher::BackendClient;
pub use state::AppState;
