// Core types shared by the simulators, the buffer pool and the window.

use std::fmt::{self, Display};

use crate::error::Error;

/// Pixel layouts a presenter may advertise. We only ever draw this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32-bit word `0x00RRGGBB`; in memory (little-endian) the bytes are blue, green, red, padding.
    Xrgb8888,
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Xrgb8888 => write!(f, "XRGB8888"),
        }
    }
}

/// Pack channels into one word in XRGB8888 order.
#[inline]
pub const fn pack_xrgb(pad: u8, r: u8, g: u8, b: u8) -> u32 {
    ((pad as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Color the border around the simulated area is painted with (every byte 0xff).
pub const BORDER_COLOR: u32 = 0xFFFF_FFFF;

/// One full frame of packed pixels.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pub width: usize,     // pixels per row
    pub height: usize,    // rows
    pub pixels: Vec<u32>, // width * height words, row-major
}

impl FrameBuffer {
    /// Reserve `width * height` words and fill them with `fill`.
    /// Reservation failure is reported instead of aborting inside the allocator.
    pub fn allocate(width: usize, height: usize, fill: u32) -> Result<Self, Error> {
        let len = width * height;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|source| Error::Allocation {
                bytes: len.saturating_mul(4),
                source,
            })?;
        pixels.resize(len, fill);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * 4
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// Pixels left along a side of `len` once a `padding` border is taken off both ends.
/// `None` when the two borders alone are wider than the side (or do not fit in a `usize`).
pub fn inner_span(len: usize, padding: usize) -> Option<usize> {
    padding.checked_mul(2).and_then(|both| len.checked_sub(both))
}

/// Rectangle handed to the presenter as the part of a frame that changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    /// Whole surface.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Surface minus a `padding` border on every side.
    pub fn interior(width: usize, height: usize, padding: usize) -> Self {
        Self {
            x: padding,
            y: padding,
            width: inner_span(width, padding).unwrap_or(0),
            height: inner_span(height, padding).unwrap_or(0),
        }
    }
}

/// Which of the two double-buffering slots a frame lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);
