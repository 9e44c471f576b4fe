pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod gateway;
pub mod progress_cache;
pub mod recognition;
pub mod save_strategy;
pub mod session;
pub mod synchronizer;
pub mod widgets;

pub use api::{ApiClient, ApiError};
pub use app::{PlayLearnClient, StartupError};
pub use auth::{AuthApi, AuthError};
pub use config::Config;
pub use gateway::{ProgressGateway, SaveEndpoint};
pub use progress_cache::ProgressCache;
pub use save_strategy::{EndpointSaveStrategy, SaveStrategy, SaveStrategyRegistry};
pub use session::{AuthState, Session, SessionStore};
pub use synchronizer::{ProgressSynchronizer, RouteLoad, SyncError, UpdateOutcome};
