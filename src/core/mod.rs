pub mod decoder;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod utils;
