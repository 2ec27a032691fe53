//! panchang_service library: Panchang computation over HTTP
//!
//! Computes tithi, nakshatra, yoga, karan and the rahu kaal / gulika kaal /
//! abhijit windows for a date and place by delegating to an external
//! calculation backend, and optionally appends every result to a Google
//! Sheets worksheet.
//!
//! # Example
//!
//! ```no_run
//! use panchang_service::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 9000,
//!     ..Default::default()
//! };
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod config;
mod error_handling;
pub mod facility;
pub mod initialization;
pub mod panchang;
pub mod recorder;
pub mod server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    BackendError, CapabilityError, FacilityError, HandleError, InitializationError, RecorderError,
};
pub use run::run_server;

mod run {
    use anyhow::{Context, Result};

    use crate::config::Config;
    use crate::initialization::{init_cors, init_state};
    use crate::server::{build_router, start_server};

    /// Builds the application from `config` and serves it until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client or CORS policy cannot be built, or the
    /// listening socket cannot be bound. An unusable calculation backend does
    /// not fail startup; it is reported per request instead.
    pub async fn run_server(config: Config) -> Result<()> {
        let state = init_state(&config).context("Failed to initialize application state")?;
        let cors = init_cors(&config.frontend_origin).context("Failed to configure CORS")?;
        let app = build_router(state, cors);
        start_server(&config.bind_address(), app).await
    }
}
