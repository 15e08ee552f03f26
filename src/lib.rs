//! Little Free Neighborhood Stories: an in-memory community story page.
//!
//! Visitors browse neighborhood stories, submit their own through a modal
//! form, and register interest in hearing one told live. All state is
//! transient; nothing is persisted or transmitted.

pub mod config;
pub mod forms;
pub mod model;
pub mod notify;
pub mod session;
pub mod store;
