// Frame driver: on every refresh pick a free slot, draw the effect into it, hand it to the
// window and ask for the next refresh.

use tracing::trace;

use crate::config::EffectKind;
use crate::error::Error;
use crate::fire::FireSim;
use crate::plasma::PlasmaSim;
use crate::pool::BufferPool;
use crate::rings;
use crate::types::{FrameBuffer, Rect, SlotId};

/// What the driver needs from whoever shows the frames.
pub trait Presenter {
    /// Show `frame` (from `slot`); `damage` lists the areas that changed.
    /// The slot stays busy until the presenter reports it released.
    fn submit(&mut self, slot: SlotId, frame: &FrameBuffer, damage: &[Rect]) -> Result<(), Error>;

    /// Ask for one notification at the next refresh.
    fn request_frame(&mut self);
}

/// The simulator picked on the command line.
pub enum Effect {
    Fire(FireSim),
    Plasma(PlasmaSim),
    Rings,
}

impl Effect {
    pub fn new(kind: EffectKind, width: usize, height: usize, seed: Option<u64>) -> Self {
        match kind {
            EffectKind::Fire => Effect::Fire(FireSim::new(width, height, seed)),
            EffectKind::Plasma => Effect::Plasma(PlasmaSim::new()),
            EffectKind::Rings => Effect::Rings,
        }
    }

    fn render(&mut self, frame: &mut FrameBuffer, padding: usize, time: u32) {
        match self {
            Effect::Fire(fire) => fire.step(frame, padding),
            Effect::Plasma(plasma) => plasma.step(frame, padding, time),
            Effect::Rings => rings::paint(frame, padding, time),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    AwaitingFirstFrame,
    Running,
}

pub struct FrameDriver {
    state: DriverState,
    pool: BufferPool,
    effect: Effect,
    width: usize,
    height: usize,
    padding: usize,
    frames: u64,
}

impl FrameDriver {
    pub fn new(width: usize, height: usize, padding: usize, effect: Effect) -> Self {
        Self {
            state: DriverState::AwaitingFirstFrame,
            pool: BufferPool::new(width, height),
            effect,
            width,
            height,
            padding,
            frames: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Frames submitted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw and submit one frame. Returns the slot that now belongs to the presenter.
    ///
    /// Running out of slots is fatal, and the error says whether it happened on the
    /// first frame or on a later one.
    /// Visual: the window shows the new frame; the previous one goes back to us later.
    pub fn redraw<P: Presenter>(&mut self, presenter: &mut P, time: u32) -> Result<SlotId, Error> {
        let first = self.state == DriverState::AwaitingFirstFrame;
        let no_slot = || {
            if first {
                Error::NoFirstBuffer
            } else {
                Error::BothBuffersBusy
            }
        };

        /* 1) free slot (allocated on first use)
           2) effect paints the interior, the border stays as allocated
           3) submit with damage, ask for the next refresh, mark the slot busy */
        let id = self.pool.acquire_free_slot()?.ok_or_else(no_slot)?;
        let frame = self.pool.frame_mut(id).ok_or_else(no_slot)?;

        self.effect.render(frame, self.padding, time);

        let interior = Rect::interior(self.width, self.height, self.padding);
        // the first frame also damages the border so the padding gets painted
        let both = [Rect::full(self.width, self.height), interior];
        let damage = if first { &both[..] } else { &both[1..] };

        presenter.submit(id, frame, damage)?;
        presenter.request_frame();
        // only after a successful submit; a refused frame leaves the slot free
        self.pool.mark_busy(id);

        self.state = DriverState::Running;
        self.frames += 1;
        trace!(slot = id.0, time, frame = self.frames, "frame submitted");
        Ok(id)
    }

    /// The presenter no longer needs this slot.
    pub fn release(&mut self, id: SlotId) {
        self.pool.release(id);
    }

    /// Free both slots. Nothing is drawn after this.
    pub fn shutdown(&mut self) {
        self.pool.clear();
    }

    #[cfg(test)]
    fn pool_mut(&mut self) -> &mut BufferPool {
        &mut self.pool
    }
}
