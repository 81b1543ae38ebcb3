pub mod handlers;
pub mod request;
pub mod storage;
pub mod upload;
pub mod urls;
