//! Geyser transaction stream filter: subscribes to a Yellowstone gRPC
//! endpoint, matches instructions by discriminator and emits the accounts
//! they touch.

pub mod config;
pub mod core;
pub mod protocols;
pub mod stream;
pub mod types;

pub use crate::config::{Commitment, FilterConfig, StreamConfig};
pub use crate::core::error::{ConfigError, SessionError};
pub use crate::core::matcher::DiscriminatorSet;
pub use crate::core::pipeline::FilterPipeline;
pub use crate::stream::event::ChannelEvent;
pub use crate::stream::session::{SessionSummary, ShutdownHandle, StreamSession};
pub use crate::stream::sink::{JsonLinesSink, ProjectionSink, TableSink};
pub use crate::stream::state::SessionState;
pub use crate::types::{AccountField, DecodedProjection};
