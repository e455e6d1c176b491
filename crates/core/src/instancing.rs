//! Instance buffer sink
//!
//! The field's only outbound dependency: a fixed-capacity array of
//! per-instance (transform, opacity) slots, one per pool index. The field
//! writes every slot each frame; the consumer uploads the raw bytes to a
//! GPU instance buffer and clears the dirty flag afterwards.

use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;

/// Destination for per-particle render data, indexed by pool slot.
pub trait InstanceSink {
    /// Write one instance's world transform and opacity. Implementations
    /// must tolerate all indices in `[0, capacity)` being written every
    /// frame.
    fn write_instance(&mut self, index: usize, transform: &Matrix4<f32>, opacity: f32);
}

/// One GPU-uploadable instance record.
///
/// `transform` is the column-major 4x4 world matrix; the trailing padding
/// keeps the record at a 16-byte multiple for uniform/storage buffer
/// layouts.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceSlot {
    pub transform: [f32; 16],
    pub opacity: f32,
    pub _padding: [f32; 3],
}

/// Fixed-capacity CPU-side staging buffer for instance records.
///
/// Capacity is set at construction and never changes; writes outside it are
/// ignored. The dirty flag mirrors the upload contract of a dynamic GPU
/// buffer attribute: any write raises it, the renderer clears it once the
/// bytes are uploaded.
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    slots: Vec<InstanceSlot>,
    dirty: bool,
}

impl InstanceBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![InstanceSlot::zeroed(); capacity],
            dirty: false,
        }
    }

    /// Number of instance slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots, in pool order.
    pub fn slots(&self) -> &[InstanceSlot] {
        &self.slots
    }

    /// Raw bytes for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.slots)
    }

    /// True when slots were written since the last [`Self::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consumer acknowledgment that the buffer contents were uploaded.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl InstanceSink for InstanceBuffer {
    fn write_instance(&mut self, index: usize, transform: &Matrix4<f32>, opacity: f32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.transform.copy_from_slice(transform.as_slice());
            slot.opacity = opacity;
            self.dirty = true;
        }
    }
}
