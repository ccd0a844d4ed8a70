//! Kanvas Engine - field-sales MSL and CSV reconciliation core
//!
//! # Architecture overview
//!
//! The engine unifies the bulk-upload and achievement logic of the Kanvas
//! field-sales dashboard into one reusable library:
//!
//! - **CSV reconciliation** (`csv`): schema-driven parse/validate/classify of
//!   delimited uploads into typed rows with per-row outcomes
//! - **Commit** (`commit`): replace-by-group (MSL) and upsert-by-key
//!   (catalog/outlets) write strategies against the data store
//! - **Achievement** (`achievement`): per-store and aggregate MSL achievement
//!   percentages over a visit window
//! - **Store** (`store`): generic async collection interface with an embedded
//!   SurrealDB implementation and typed repositories
//! - **Events** (`events`): typed broadcast bus replacing ambient UI events
//!
//! # Module structure
//!
//! ```text
//! kanvas-engine/src/
//! ├── config.rs      # env-driven configuration
//! ├── logger.rs      # tracing setup
//! ├── events.rs      # typed event bus
//! ├── csv/           # parse, row decoders, export
//! ├── commit.rs      # replace/upsert write strategies
//! ├── achievement/   # pure calculator + read-aggregate service
//! └── store/         # Collection trait, SurrealDB impl, repositories
//! ```

pub mod achievement;
pub mod commit;
pub mod config;
pub mod csv;
pub mod events;
pub mod logger;
pub mod store;

// Re-export public types
pub use achievement::{
    AchievementResult, AchievementService, DateWindow, StoreAchievement, StoreVisitFacts,
};
pub use commit::{CommitEngine, CommitOutcome, ReplaceOutcome};
pub use config::Config;
pub use csv::{ParseError, ParseResult, ParsedRow, RowAction, RowOutcome};
pub use events::{EngineEvent, EventBus};
pub use store::{Collection, Filter, StoreError, StoreResult};

// Re-export logger functions
pub use logger::{init_logger, init_logger_with_file};
