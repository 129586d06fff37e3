pub mod article;
pub mod reader;
pub mod session;
pub mod store;
pub mod subscription;
pub mod user;
