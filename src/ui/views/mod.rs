//! View rendering functions for the UI components.
//!
//! - `layout`: window composition
//! - `search`: query box and result list
//! - `metadata`: tag fields and lyrics editor
//! - `artwork`: cover preview and picker
//! - `download`: library folder, download button and status line

mod artwork;
mod download;
mod layout;
mod metadata;
mod search;

pub use layout::main_view;
