//! # Meeple API
//!
//! REST backend for a board-game rental shop.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Client ───► axum Router ───► handlers ───► meeple-db ───► SQLite      │
//! │                   │              │                                      │
//! │              TraceLayer      meeple-core                                │
//! │              CorsLayer    (validation, pricing,                         │
//! │                            availability rules)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! ```text
//! meeple_api/
//! ├── lib.rs          ◄─── You are here
//! ├── main.rs         ◄─── Binary: config, tracing, serve
//! ├── config.rs       ◄─── ServerConfig (defaults → TOML → env)
//! ├── error.rs        ◄─── ApiError → JSON error responses
//! ├── extract.rs      ◄─── JSON body / id extractors
//! ├── routes.rs       ◄─── Route table
//! ├── state.rs        ◄─── AppState (database handle + clock)
//! └── handlers/       ◄─── One module per resource
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;
pub use state::{AppState, Clock};
