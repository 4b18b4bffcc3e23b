pub mod auth;
pub mod catalog;
pub mod error;
pub mod navigation;
pub mod registry;
pub mod session;
pub mod view;
