pub mod client;
pub mod event;
pub mod request;
pub mod session;
pub mod sink;
pub mod state;
