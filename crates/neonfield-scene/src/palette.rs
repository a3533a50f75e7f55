//! Fixed scene colors as `0xRRGGBB` literals.

use neonfield_engine::paint::Rgb;
use rand::Rng;

pub const CYAN: u32 = 0x00f3ff;
pub const MAGENTA: u32 = 0xff00ff;
pub const BLUE: u32 = 0x0066ff;

/// Colors for buildings, streams and panels.
pub const PALETTE: [u32; 3] = [CYAN, MAGENTA, BLUE];

/// Particles only use the first two.
pub const PARTICLE_COLORS: [u32; 2] = [CYAN, MAGENTA];

/// Uniform pick from [`PALETTE`].
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

/// Even odds between the two particle colors.
pub fn pick_particle<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(0.5) { PARTICLE_COLORS[0] } else { PARTICLE_COLORS[1] }
}

/// Normalized `[r, g, b]` channels (`channel / 255`).
#[inline]
pub fn normalized(hex: u32) -> [f32; 3] {
    Rgb::from_hex(hex).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn normalized_matches_channel_over_255() {
        assert_eq!(normalized(BLUE), [0.0, 102.0 / 255.0, 1.0]);
        assert_eq!(normalized(MAGENTA), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn picks_cover_the_whole_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let c = pick(&mut rng);
            let idx = PALETTE.iter().position(|&p| p == c).expect("pick returned a palette color");
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn particle_picks_stay_in_two_colors() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!((0..500).all(|_| PARTICLE_COLORS.contains(&pick_particle(&mut rng))));
    }
}
