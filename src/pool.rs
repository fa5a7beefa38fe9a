// Two frames, used alternately. While the window holds one ("busy") we draw into the other.

use tracing::{debug, warn};

use crate::error::Error;
use crate::types::{BORDER_COLOR, FrameBuffer, SlotId};

pub const SLOT_COUNT: usize = 2;

#[derive(Default)]
struct Slot {
    frame: Option<FrameBuffer>, // allocated the first time the slot is handed out
    busy: bool,                 // true from submit until the window releases it
}

pub struct BufferPool {
    width: usize,
    height: usize,
    slots: [Slot; SLOT_COUNT],
}

impl BufferPool {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: Default::default(),
        }
    }

    /// First slot that is not busy, slot 0 before slot 1. `Ok(None)` when both are busy.
    ///
    /// A slot's memory is created on its first acquisition and painted entirely with the
    /// border color, so the padding around the simulated area is visible from frame one.
    /// Visual: a white frame around the effect, never touched again.
    pub fn acquire_free_slot(&mut self) -> Result<Option<SlotId>, Error> {
        /* 1) lowest slot the window is not holding
           2) on its first use, allocate it pre-filled with the border color */
        let Some(idx) = self.slots.iter().position(|s| !s.busy) else {
            return Ok(None);
        };

        let slot = &mut self.slots[idx];
        if slot.frame.is_none() {
            let frame = FrameBuffer::allocate(self.width, self.height, BORDER_COLOR)?;
            debug!(
                slot = idx,
                bytes = frame.stride() * frame.height,
                "allocated frame"
            );
            slot.frame = Some(frame);
        }
        Ok(Some(SlotId(idx)))
    }

    /// Frame of a slot the caller may draw into. `None` if the slot is busy or was
    /// never acquired.
    pub fn frame_mut(&mut self, id: SlotId) -> Option<&mut FrameBuffer> {
        let slot = self.slots.get_mut(id.0)?;
        if slot.busy {
            return None;
        }
        slot.frame.as_mut()
    }

    #[cfg(test)]
    pub fn frame(&self, id: SlotId) -> Option<&FrameBuffer> {
        self.slots.get(id.0)?.frame.as_ref()
    }

    pub fn mark_busy(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.busy = true;
        }
    }

    /// The window is done with this slot. Releasing a slot that was not busy is
    /// logged and otherwise ignored.
    pub fn release(&mut self, id: SlotId) {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.busy => slot.busy = false,
            Some(_) => warn!(slot = id.0, "release for a slot that was not submitted"),
            None => warn!(slot = id.0, "release for an unknown slot"),
        }
    }

    #[cfg(test)]
    pub fn is_busy(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.busy)
    }

    #[cfg(test)]
    pub fn is_allocated(&self, id: SlotId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.frame.is_some())
    }

    /// Drop both frames. Used on shutdown.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::default();
        }
    }
}
