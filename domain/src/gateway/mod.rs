//! HTTP clients for the external services this gateway fronts.

pub mod gemini;
pub mod rapid_api;
