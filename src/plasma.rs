// Plasma: four sine waves summed per pixel, their phases drifting a little every frame.
// Writes colors straight into the frame; no palette, no heat grid.

use crate::types::FrameBuffer;

/// Phases wrap at 512 steps per turn.
const PHASE_MASK: u32 = 0x1ff;
const PHASE_STEPS: usize = 512;

/// `sin` of a 9-bit phase, scaled by 1024 and truncated toward zero.
fn scaled_sin(phase: u32) -> i32 {
    // 360 / 512 degrees per step, then degrees → radians
    let rad = (phase as f32 * 0.703125) * 0.0174532;
    ((rad as f64).sin() * 1024.0) as i32
}

pub struct PlasmaSim {
    sin_table: [i32; PHASE_STEPS],
    // p1 and p3 move every frame; p2 and p4 are the fixed offsets of the other two waves
    p1: u32,
    p2: u32,
    p3: u32,
    p4: u32,
}

impl PlasmaSim {
    pub fn new() -> Self {
        let mut sin_table = [0; PHASE_STEPS];
        for (phase, v) in sin_table.iter_mut().enumerate() {
            *v = scaled_sin(phase as u32);
        }
        Self {
            sin_table,
            p1: 0,
            p2: 0,
            p3: 0,
            p4: 0,
        }
    }

    /// Current `(p1, p2, p3, p4)`, each already reduced to 9 bits.
    #[cfg(test)]
    pub fn phases(&self) -> (u32, u32, u32, u32) {
        (self.p1, self.p2, self.p3, self.p4)
    }

    #[inline]
    fn sin(&self, phase: u32) -> i32 {
        self.sin_table[(phase & PHASE_MASK) as usize]
    }

    /// Paint one frame inside the `padding` border and advance the phases.
    /// `time` is accepted for symmetry with the other effects; the drift is per frame.
    pub fn step(&mut self, frame: &mut FrameBuffer, padding: usize, _time: u32) {
        let (width, height) = (frame.width, frame.height);
        let mut t3 = self.p3;
        let mut t4 = self.p4;

        for y in padding..height.saturating_sub(padding) {
            let mut t1 = self.p1 + 5;
            let mut t2 = self.p2 + 3;
            t3 &= PHASE_MASK;
            t4 &= PHASE_MASK;

            let row = y * width;
            for x in padding..width.saturating_sub(padding) {
                t1 &= PHASE_MASK;
                t2 &= PHASE_MASK;

                let sum = self.sin(t1) + self.sin(t2) + self.sin(t3) + self.sin(t4);
                frame.pixels[row + x] = plasma_color(sum);

                t1 += 5;
                t2 += 3;
            }

            t3 += 1;
            t4 += 3;
        }

        self.p1 = (self.p1 + 9) & PHASE_MASK;
        self.p3 = (self.p3 + 8) & PHASE_MASK;
    }
}

impl Default for PlasmaSim {
    fn default() -> Self {
        Self::new()
    }
}

/// Low byte of the wave sum as blue, a fifth of it as green, a third as red.
/// Negative sums are sign-extended, which floods the upper bytes on purpose.
#[inline]
fn plasma_color(sum: i32) -> u32 {
    ((sum & 0xff) | ((sum / 5) << 8) | ((sum / 3) << 16)) as u32
}
