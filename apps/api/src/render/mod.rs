//! The two presentation surfaces: HTML live preview and PDF export.
//!
//! Both renderers consume the same `(title, CvData, TemplateId)` triple and
//! are kept independent; only the formatting helpers in [`format`] are
//! shared. For every template, a section whose list is empty renders
//! nothing on either surface.

pub mod format;
pub mod handlers;
pub mod pdf;
pub mod preview;
