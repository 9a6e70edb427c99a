//! Business logic for the tubebrief gateway: transcript normalization,
//! summary generation, and the upstream API clients both are built on.

pub mod error;
pub mod gateway;
pub mod markdown;
pub mod summary;
pub mod transcript;
