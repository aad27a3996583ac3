//! Client side of the kudos board: a typed wrapper over the REST API, the
//! board list store, dashboard filtering, pre-submit form rules and the GIF
//! search integration.

pub mod api;
pub mod error;
pub mod filter;
pub mod forms;
pub mod giphy;
pub mod store;

pub use api::KudosClient;
pub use error::ClientError;
