//! GPU Instance Records for Body Rendering
//!
//! The simulation hands its bodies to an external renderer as a flat array
//! of [`BodyInstance`] records: one blended model matrix plus the body tag,
//! laid out so the slice can be uploaded to an instance buffer unchanged.

use crate::physics::body::{Body, BodyTag};

/// Per-body draw record.
///
/// Layout (80 bytes total, 16-byte aligned for GPU compatibility):
/// - model: mat4x4<f32> (64 bytes) - Column-major blended draw transform
/// - tag:   u32 (4 bytes) - [`BodyTag::code`] of the body
/// - _pad:  3 x u32 (12 bytes) - Padding to a 16-byte stride
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    /// Column-major model matrix - 64 bytes
    pub model: [[f32; 4]; 4],
    /// Body tag code - 4 bytes
    pub tag: u32,
    /// Padding to keep the stride a multiple of 16 - 12 bytes
    pub _pad: [u32; 3],
}

static_assertions::assert_eq_size!(BodyInstance, [u8; 80]);

impl BodyInstance {
    /// Snapshot a body's last blended transform.
    pub fn from_body(body: &Body) -> Self {
        Self {
            model: body.drawn_location().to_cols_array_2d(),
            tag: body.tag().code(),
            _pad: [0; 3],
        }
    }

    /// Returns true if this record was produced from a body with `tag`.
    pub fn is(&self, tag: BodyTag) -> bool {
        self.tag == tag.code()
    }
}

/// View a slice of instances as raw bytes for buffer upload.
pub fn instance_bytes(instances: &[BodyInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
