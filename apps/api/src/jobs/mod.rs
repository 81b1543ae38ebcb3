pub mod handlers;
pub mod request;
pub mod stats;
