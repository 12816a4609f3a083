//! The dashboard pages. Each page builds a view from the context and
//! renders it as text.

pub mod about;
pub mod demo;
pub mod overview;
pub mod reviews;
pub mod sentiment;
pub mod topics;

/// Option meaning "no filter" in the review explorer.
pub const ALL_OPTION: &str = "Semua";
