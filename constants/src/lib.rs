//! Shared scene composition settings for the model gallery.
//!
//! Every value here is static configuration handed to the renderer; nothing
//! is computed at runtime.

pub mod animation;
pub mod layout;
pub mod lighting;
pub mod orbit;
pub mod viewport;
