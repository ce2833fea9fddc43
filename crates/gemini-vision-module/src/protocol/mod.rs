//! JSON-RPC dispatch for the vision-service surface.

pub mod handler;
pub mod validator;

pub use handler::{ModelFactory, VisionHandler};
