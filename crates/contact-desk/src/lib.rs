//! Contact-form pipeline for a property services website: field rules, inline
//! feedback, message composition, and the WhatsApp / email handoff.

pub mod config;
pub mod error;
pub mod form;
pub mod telemetry;
