//! UI rendering module for the district performance dashboard
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod compare;
pub mod dashboard;
pub mod district_detail;
pub mod district_list;
pub mod help_overlay;
pub mod trends;
pub mod widgets;

pub use district_detail::render as render_district_detail;
pub use district_list::render_district_list;
pub use help_overlay::render as render_help_overlay;
