// Heat → color lookup table for the fire.
// Built once at startup, then every simulated cell is a single array read.

use crate::types::pack_xrgb;

pub struct Palette {
    // heat (0..255) -> packed XRGB8888 word
    colors: [u32; 256],
}

impl Palette {
    /// Build the black → blue → red → yellow → white gradient.
    ///
    /// Eight blocks of 32 indices. A channel a block does not mention stays zero,
    /// and the padding byte is always zero.
    pub fn new() -> Self {
        // Per-channel tables so each block only touches the channels it names.
        let mut r = [0u8; 256];
        let mut g = [0u8; 256];
        let mut b = [0u8; 256];

        for i in 0..32usize {
            let v = i as u8;

            // black to blue
            b[i] = v << 1;

            // blue to red
            r[i + 32] = v << 3;
            b[i + 32] = 64 - (v << 1);

            // red to yellow
            r[i + 64] = 255;
            g[i + 64] = v << 3;

            // yellow to white, in five steps
            for (base, blue) in [
                (96, v << 2),
                (128, 64 + (v << 2)),
                (160, 128 + (v << 2)),
                (192, 192 + v),
                (224, 224 + v),
            ] {
                r[base + i] = 255;
                g[base + i] = 255;
                b[base + i] = blue;
            }
        }

        let mut colors = [0u32; 256];
        for (idx, c) in colors.iter_mut().enumerate() {
            *c = pack_xrgb(0, r[idx], g[idx], b[idx]);
        }
        Self { colors }
    }

    #[inline]
    pub fn lookup(&self, heat: u8) -> u32 {
        self.colors[heat as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
