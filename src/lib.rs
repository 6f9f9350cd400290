pub mod classify;
pub mod config;
pub mod elements;
pub mod error;
pub mod host;
pub mod parse;
pub mod session;
pub mod settings;
pub mod wasm;
