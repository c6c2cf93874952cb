//! サーバーAPI連携

pub mod match_api;

pub use match_api::WebMatchService;
