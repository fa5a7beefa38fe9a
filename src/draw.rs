// Window that shows our frames.
// It stands in for the display server: it takes submitted slots, tells us when it is done
// with one, and hands out a refresh notification with a millisecond timestamp.

use std::collections::VecDeque;
use std::time::Instant;

use minifb::{Key, Window, WindowOptions};
use tracing::{debug, trace};

use crate::driver::Presenter;
use crate::error::Error;
use crate::types::{FrameBuffer, PixelFormat, Rect, SlotId};

/// What one `dispatch` call delivers, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The window no longer reads this slot.
    Released(SlotId),
    /// Display refresh; `time` is milliseconds since the window opened.
    Frame { time: u32 },
}

/// A presenter that also runs the event loop: each `dispatch` blocks for one turn and
/// hands back what happened, in delivery order.
pub trait EventSource: Presenter {
    fn dispatch(&mut self) -> Result<Vec<Event>, Error>;
}

/// Pending notifications plus the bookkeeping of which slot is on screen.
/// Kept apart from the window so the ordering rules can be tested headless.
#[derive(Default)]
struct EventQueue {
    events: VecDeque<Event>,
    on_screen: Option<SlotId>,
    frame_requested: bool,
}

impl EventQueue {
    /// `slot` replaced whatever was on screen; the old slot is now free.
    fn presented(&mut self, slot: SlotId) {
        if let Some(prev) = self.on_screen.replace(slot) {
            if prev != slot {
                self.events.push_back(Event::Released(prev));
            }
        }
    }

    /// Releases first, then at most one refresh for the one that was requested.
    fn drain(&mut self, now_ms: u32) -> Vec<Event> {
        if std::mem::take(&mut self.frame_requested) {
            self.events.push_back(Event::Frame { time: now_ms });
        }
        self.events.drain(..).collect()
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
    width: usize,
    height: usize,
    started: Instant,
    queue: EventQueue,
}

impl Drawer {
    /// Open a fixed-size window capped at `fps` refreshes per second.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| Error::Capability(e.to_string()))?;
        window.set_target_fps(fps);
        debug!(width, height, fps, "window open");

        Ok(Self {
            window,
            width,
            height,
            started: Instant::now(),
            queue: EventQueue::default(),
        })
    }

    /// minifb takes `0x00RRGGBB` words, nothing else.
    pub fn supports_format(&self, format: PixelFormat) -> bool {
        format == PixelFormat::Xrgb8888
    }

    fn now_ms(&self) -> u32 {
        // wraps after ~49 days, like a display server's 32-bit timestamp
        self.started.elapsed().as_millis() as u32
    }
}

impl EventSource for Drawer {
    /// One turn of the event loop. Fails once the window is closed or Escape is held.
    fn dispatch(&mut self) -> Result<Vec<Event>, Error> {
        if !self.window.is_open() {
            return Err(Error::Dispatch("window closed".into()));
        }
        if self.window.is_key_down(Key::Escape) {
            return Err(Error::Dispatch("escape pressed".into()));
        }

        let events = self.queue.drain(self.now_ms());
        if events.is_empty() {
            // nothing queued: keep input flowing and wait out one refresh
            self.window.update();
        }
        Ok(events)
    }
}

impl Presenter for Drawer {
    fn submit(&mut self, slot: SlotId, frame: &FrameBuffer, damage: &[Rect]) -> Result<(), Error> {
        trace!(slot = slot.0, ?damage, "present");
        // minifb redraws the whole window; damage is informational
        self.window
            .update_with_buffer(&frame.pixels, self.width, self.height)
            .map_err(|e| Error::Dispatch(e.to_string()))?;
        self.queue.presented(slot);
        Ok(())
    }

    fn request_frame(&mut self) {
        self.queue.frame_requested = true;
    }
}
