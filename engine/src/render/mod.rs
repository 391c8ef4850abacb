//! Render Module
//!
//! Drawing happens outside the crate. This module only packs blended body
//! transforms into GPU-ready instance records.

pub mod instances;

pub use instances::{BodyInstance, instance_bytes};
