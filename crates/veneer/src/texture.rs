//! Texture slots with last-completion-wins decode semantics.

use thiserror::Error;
use veneer_decal::PixelBuffer;

/// Errors from texture decoding.
#[derive(Debug, Clone, Error)]
pub enum TextureError {
    /// The image reference could not be decoded into a pixel buffer.
    #[error("texture decode failed: {0}")]
    DecodeFailed(String),
}

/// A ticket identifying one in-flight decode for a slot.
///
/// Obtained from [`TextureSlot::begin_load`]; only the most recently
/// issued ticket for a slot can apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// One logical texture binding.
///
/// Decoding happens off the interaction loop; each decode is registered
/// with [`begin_load`](Self::begin_load) and reported back through
/// [`complete`](Self::complete). When several decodes for the same slot
/// are in flight, the last one *started* wins: completions holding a
/// stale ticket are dropped on the floor, and a replaced pixel buffer is
/// released when the new one moves in. A failed decode leaves the slot
/// as it was — the dependent decal simply stays unrendered if nothing
/// was ever bound.
#[derive(Debug, Default)]
pub struct TextureSlot {
    generation: u64,
    buffer: Option<PixelBuffer>,
}

impl TextureSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new decode; invalidates every earlier ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Report a decode result. Returns `true` if the result was applied.
    ///
    /// Stale tickets (a newer load has started since) are ignored.
    /// Failures are logged and swallowed; they never propagate into the
    /// interaction loop.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<PixelBuffer, TextureError>,
    ) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "dropping stale texture completion (ticket {}, current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        match result {
            Ok(buffer) => {
                self.buffer = Some(buffer);
                true
            }
            Err(err) => {
                log::warn!("texture load failed, leaving slot unrendered: {err}");
                false
            }
        }
    }

    /// The currently bound pixel buffer, if any decode has succeeded.
    pub fn texture(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_applies() {
        let mut slot = TextureSlot::new();
        let ticket = slot.begin_load();
        assert!(slot.complete(ticket, Ok(PixelBuffer::solid(1, 1, [1, 1, 1, 255]))));
        assert!(slot.texture().is_some());
    }

    #[test]
    fn test_stale_completion_ignored() {
        let mut slot = TextureSlot::new();
        let old = slot.begin_load();
        let new = slot.begin_load();
        // The older decode finishes *after* the newer one
        assert!(slot.complete(new, Ok(PixelBuffer::solid(1, 1, [2, 2, 2, 255]))));
        assert!(!slot.complete(old, Ok(PixelBuffer::solid(1, 1, [9, 9, 9, 255]))));
        assert_eq!(slot.texture().unwrap().data[0], [2, 2, 2, 255]);
    }

    #[test]
    fn test_failure_leaves_slot_unchanged() {
        let mut slot = TextureSlot::new();
        let t1 = slot.begin_load();
        slot.complete(t1, Ok(PixelBuffer::solid(1, 1, [5, 5, 5, 255])));

        let t2 = slot.begin_load();
        assert!(!slot.complete(t2, Err(TextureError::DecodeFailed("bad bytes".into()))));
        assert_eq!(slot.texture().unwrap().data[0], [5, 5, 5, 255]);
    }

    #[test]
    fn test_empty_slot_unrendered() {
        let slot = TextureSlot::new();
        assert!(slot.texture().is_none());
    }
}
