// Fire: heat rises from a randomly lit bottom row, averaging and cooling as it goes.
// The heat grid is the only state; every frame the simulated rows are repainted
// through the palette.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::palette::Palette;
use crate::types::{FrameBuffer, inner_span};

/// Ignition draws above this (out of 1..=16) light a column.
const IGNITE_ABOVE: u8 = 9;

/// Grid of 8-bit intensities, same shape as the frame it is painted into.
pub struct HeatField {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl HeatField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, heat: u8) {
        self.cells[y * self.width + x] = heat;
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

pub struct FireSim<R = StdRng> {
    heat: HeatField,
    palette: Palette,
    rng: R,
}

impl FireSim<StdRng> {
    /// Fire with ignition seeded from `seed`, or from OS entropy when `None`.
    pub fn new(width: usize, height: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(width, height, rng)
    }
}

impl<R: Rng> FireSim<R> {
    pub fn with_rng(width: usize, height: usize, rng: R) -> Self {
        Self {
            heat: HeatField::new(width, height),
            palette: Palette::new(),
            rng,
        }
    }

    #[cfg(test)]
    pub fn heat(&self) -> &HeatField {
        &self.heat
    }

    #[cfg(test)]
    pub fn heat_mut(&mut self) -> &mut HeatField {
        &mut self.heat
    }

    /// One simulation step painted into `frame`: light the bottom row, then let it rise.
    /// Geometry too small to hold a simulated area is a no-op.
    /// Visual: flames flicker along the bottom edge and fade to dark red near the top.
    pub fn step(&mut self, frame: &mut FrameBuffer, padding: usize) {
        if !self.fits(frame, padding) {
            return;
        }
        self.ignite(frame, padding);
        self.propagate(frame, padding);
    }

    fn fits(&self, frame: &FrameBuffer, padding: usize) -> bool {
        frame.width == self.heat.width
            && frame.height == self.heat.height
            && inner_span(self.heat.width, padding).is_some_and(|cols| cols >= 2)
            && inner_span(self.heat.height, padding).is_some_and(|rows| rows >= 1)
    }

    /// Light each simulated column of the bottom row with roughly 7-in-16 odds.
    /// Visual: a ragged line of white-hot and black pixels, new every frame.
    fn ignite(&mut self, frame: &mut FrameBuffer, padding: usize) {
        let bottom = self.heat.height - padding - 1;
        for x in padding..self.heat.width - padding {
            let draw: u8 = self.rng.gen_range(1..=16);
            let heat = if draw > IGNITE_ABOVE { 0xff } else { 0x00 };
            self.paint(frame, x, bottom, heat);
        }
    }

    /// Sweep bottom to top: each cell of row `y` averages with its neighbours and the
    /// cell above, cools by one, and the result lands in row `y - 1`.
    ///
    /// Rows are updated in place, so a row's left/right neighbours are the values
    /// this same sweep just wrote into it.
    pub(crate) fn propagate(&mut self, frame: &mut FrameBuffer, padding: usize) {
        let width = self.heat.width;
        let bottom = self.heat.height - padding - 1;
        let left = padding;
        let right = width - 1 - padding;
        // row 0 has nothing above it to write into
        let top = padding.max(1);

        for y in (top..=bottom).rev() {
            for x in left..=right {
                /* 1) the cell itself plus the one above
                   2) its left and/or right neighbour; edge columns have only one
                   3) average, cool by one, write one row up */
                let mut sum = self.heat.get(x, y) as u32 + self.heat.get(x, y - 1) as u32;

                if x == left {
                    sum += self.heat.get(x + 1, y) as u32;
                    sum /= 3;
                } else if x == right {
                    sum += self.heat.get(x - 1, y) as u32;
                    sum /= 3;
                } else {
                    sum += self.heat.get(x + 1, y) as u32;
                    sum += self.heat.get(x - 1, y) as u32;
                    sum /= 4;
                }

                // heat 1 never cools to 0, so embers linger at the top
                if sum > 1 {
                    sum -= 1;
                }

                self.paint(frame, x, y - 1, sum as u8);
            }
        }
    }

    #[inline]
    fn paint(&mut self, frame: &mut FrameBuffer, x: usize, y: usize, heat: u8) {
        self.heat.set(x, y, heat);
        let idx = frame.index(x, y);
        frame.pixels[idx] = self.palette.lookup(heat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BORDER_COLOR;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    fn frame(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer::allocate(width, height, BORDER_COLOR).unwrap()
    }

    #[test]
    fn ignition_lights_or_clears_whole_bottom_row() {
        // StepRng at u32::MAX always draws 16, at 0 always draws 1.
        let mut hot = FireSim::with_rng(10, 10, StepRng::new(u64::MAX, 0));
        let mut fb = frame(10, 10);
        hot.ignite(&mut fb, 2);
        for x in 2..8 {
            assert_eq!(hot.heat().get(x, 7), 255);
            assert_eq!(fb.pixels[fb.index(x, 7)], Palette::new().lookup(255));
        }
        assert_eq!(hot.heat().get(1, 7), 0, "padding column untouched");

        let mut cold = FireSim::with_rng(10, 10, StepRng::new(0, 0));
        cold.heat_mut().set(4, 7, 200);
        cold.ignite(&mut fb, 2);
        assert!((2..8).all(|x| cold.heat().get(x, 7) == 0));
    }

    #[test]
    fn border_cells_average_three_interior_cells_four() {
        // width 8, padding 1 → simulated columns 1..=6, bottom row 4
        let mut sim = FireSim::with_rng(8, 6, StepRng::new(0, 0));
        let mut fb = frame(8, 6);
        for (x, v) in [(1, 90), (2, 30), (3, 60), (4, 120), (5, 200), (6, 255)] {
            sim.heat_mut().set(x, 4, v);
        }

        sim.propagate(&mut fb, 1);

        // left border: (90 + 0 + 30) / 3 - 1
        assert_eq!(sim.heat().get(1, 3), 39);
        // interior: (60 + 0 + 120 + 30) / 4 - 1
        assert_eq!(sim.heat().get(3, 3), 51);
        // right border: (255 + 0 + 200) / 3 - 1
        assert_eq!(sim.heat().get(6, 3), 150);
        assert_eq!(fb.pixels[fb.index(6, 3)], Palette::new().lookup(150));
    }

    #[test]
    fn averages_of_one_or_less_do_not_decay() {
        let mut sim = FireSim::with_rng(8, 6, StepRng::new(0, 0));
        let mut fb = frame(8, 6);
        for x in 1..7 {
            sim.heat_mut().set(x, 4, 1);
            sim.heat_mut().set(x, 3, 1);
        }
        sim.propagate(&mut fb, 1);
        assert!((1..7).all(|x| sim.heat().get(x, 3) == 1));
    }

    #[test]
    fn zero_padding_paints_up_to_the_top_row() {
        let mut sim = FireSim::new(6, 4, Some(7));
        let mut fb = frame(6, 4);
        for _ in 0..5 {
            sim.step(&mut fb, 0);
        }
        // every row, row 0 included, went through the palette
        assert!(fb.pixels.iter().all(|&p| p != BORDER_COLOR));
    }

    #[test]
    fn too_small_geometry_is_a_no_op() {
        let mut sim = FireSim::new(4, 4, Some(1));
        let mut fb = frame(4, 4);
        sim.step(&mut fb, 2);
        assert!(sim.heat().cells().iter().all(|&h| h == 0));
        assert!(fb.pixels.iter().all(|&p| p == BORDER_COLOR));
    }

    #[test]
    fn huge_padding_is_a_no_op() {
        let mut sim = FireSim::new(250, 250, Some(1));
        let mut fb = frame(250, 250);
        for pad in [usize::MAX, 1 << (usize::BITS - 1), 125] {
            sim.step(&mut fb, pad);
        }
        assert!(sim.heat().cells().iter().all(|&h| h == 0));
        assert!(fb.pixels.iter().all(|&p| p == BORDER_COLOR));
    }

    #[test]
    fn same_seed_same_fire() {
        let mut a = FireSim::new(64, 48, Some(0xF1AE));
        let mut b = FireSim::new(64, 48, Some(0xF1AE));
        let mut fa = frame(64, 48);
        let mut fb = frame(64, 48);
        for _ in 0..40 {
            a.step(&mut fa, 4);
            b.step(&mut fb, 4);
        }
        assert_eq!(a.heat().cells(), b.heat().cells());
        assert_eq!(fa.pixels, fb.pixels);
    }

    #[test]
    fn hundred_steps_stay_in_range_and_inside_the_border() {
        let (w, h, pad) = (250, 250, 20);
        let palette = Palette::new();
        let mut sim = FireSim::new(w, h, Some(42));
        let mut fb = frame(w, h);

        for _ in 0..100 {
            sim.step(&mut fb, pad);
            for y in 0..h {
                for x in 0..w {
                    let heat = sim.heat().get(x, y);
                    // rows pad-1 ..= h-pad-1 are written: the sweep's last write lands one row above
                    let simulated = (pad..w - pad).contains(&x) && (pad - 1..h - pad).contains(&y);
                    if simulated {
                        assert_eq!(fb.pixels[fb.index(x, y)], palette.lookup(heat));
                    } else {
                        assert_eq!(heat, 0);
                        assert_eq!(fb.pixels[fb.index(x, y)], BORDER_COLOR);
                    }
                }
            }
        }
        assert!(sim.heat().cells().iter().any(|&h| h > 0), "fire never lit");
    }

    proptest! {
        #[test]
        fn first_risen_row_is_the_decayed_average(
            below in prop::collection::vec(any::<u8>(), 6),
            above in prop::collection::vec(any::<u8>(), 6),
        ) {
            let mut sim = FireSim::with_rng(8, 6, StepRng::new(0, 0));
            let mut fb = frame(8, 6);
            for x in 0..6 {
                sim.heat_mut().set(x + 1, 4, below[x]);
                sim.heat_mut().set(x + 1, 3, above[x]);
            }

            sim.propagate(&mut fb, 1);

            for x in 0..6 {
                let me = below[x] as u32 + above[x] as u32;
                let avg = match x {
                    0 => (me + below[1] as u32) / 3,
                    5 => (me + below[4] as u32) / 3,
                    _ => (me + below[x - 1] as u32 + below[x + 1] as u32) / 4,
                };
                let want = if avg > 1 { avg - 1 } else { avg };
                prop_assert!(avg <= 255);
                prop_assert_eq!(sim.heat().get(x + 1, 3) as u32, want);
            }
        }
    }
}
