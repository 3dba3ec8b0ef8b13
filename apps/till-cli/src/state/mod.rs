//! # State Module
//!
//! What a running `till` holds on to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │      TillConfig          │        │       SessionState           │  │
//! │  │                          │        │                              │  │
//! │  │  store_name              │ ─────► │  ProductCatalog              │  │
//! │  │  catalog_path            │        │  Checkout (scans, promos)    │  │
//! │  │  print_timestamp         │        │  receipt settings            │  │
//! │  │  promotions              │        │                              │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │                                                                         │
//! │  • TillConfig: read-only after startup                                 │
//! │  • SessionState: owned by one command, single-threaded                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigResult, PromotionConfig, TillConfig};
pub use session::SessionState;
