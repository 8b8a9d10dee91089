//! Session lifecycle glue between the auth collaborator and the synchronizers

pub mod context;

pub use context::{AuthEvent, SessionContext};
