// Rings: the classic shared-memory test card. A disc, a ring and a background of
// stripes, each scrolling with time at its own speed, crossed by two diagonals.

use crate::types::{FrameBuffer, inner_span};

/// Spreads one counter over all three channels at different rates.
const STRIPE: u32 = 0x0080401;

pub fn paint(frame: &mut FrameBuffer, padding: usize, time: u32) {
    let has_inside = |len| inner_span(len, padding).is_some_and(|n| n > 0);
    if !has_inside(frame.width) || !has_inside(frame.height) {
        return;
    }
    // padding is now smaller than half a side, so everything fits in i32 geometry
    let (width, height) = (frame.width as i32, frame.height as i32);
    let pad = padding as i32;

    let halfh = pad + (height - pad * 2) / 2;
    let halfw = pad + (width - pad * 2) / 2;

    // squared radii thresholds
    let outer = halfw.min(halfh) - 8;
    let inner = outer - 32;
    let (outer2, inner2) = (outer * outer, inner * inner);

    for y in pad..height - pad {
        let y2 = (y - halfh) * (y - halfh);
        let row = y as usize * frame.width;

        for x in pad..width - pad {
            let r2 = (x - halfw) * (x - halfw) + y2;

            let base = if r2 < inner2 {
                (r2 as u32 / 32).wrapping_add(time / 64)
            } else if r2 < outer2 {
                (y as u32).wrapping_add(time / 32)
            } else {
                (x as u32).wrapping_add(time / 16)
            };
            let mut v = base.wrapping_mul(STRIPE) & 0x00ff_ffff;

            // cross shows if the compositor treats X as alpha
            if (x - y).abs() > 6 && (x + y - height).abs() > 6 {
                v |= 0xff00_0000;
            }

            frame.pixels[row + x as usize] = v;
        }
    }
}
