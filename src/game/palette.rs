//! The fixed six-color palette food and snake colors are drawn from.

use bevy::prelude::*;
use rand::Rng;

/// Named palette color. The snake's target color and every food carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnakeColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl SnakeColor {
    pub const ALL: [SnakeColor; 6] = [
        SnakeColor::Red,
        SnakeColor::Blue,
        SnakeColor::Green,
        SnakeColor::Yellow,
        SnakeColor::Purple,
        SnakeColor::Orange,
    ];

    /// Picks a palette color uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Upper-case display name used by the color indicator.
    pub fn name(&self) -> &'static str {
        match self {
            SnakeColor::Red => "RED",
            SnakeColor::Blue => "BLUE",
            SnakeColor::Green => "GREEN",
            SnakeColor::Yellow => "YELLOW",
            SnakeColor::Purple => "PURPLE",
            SnakeColor::Orange => "ORANGE",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            SnakeColor::Red => "#ff6b6b",
            SnakeColor::Blue => "#4ecdc4",
            SnakeColor::Green => "#95e1d3",
            SnakeColor::Yellow => "#f9ca24",
            SnakeColor::Purple => "#a55eea",
            SnakeColor::Orange => "#ff9f43",
        }
    }

    fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SnakeColor::Red => (0xff, 0x6b, 0x6b),
            SnakeColor::Blue => (0x4e, 0xcd, 0xc4),
            SnakeColor::Green => (0x95, 0xe1, 0xd3),
            SnakeColor::Yellow => (0xf9, 0xca, 0x24),
            SnakeColor::Purple => (0xa5, 0x5e, 0xea),
            SnakeColor::Orange => (0xff, 0x9f, 0x43),
        }
    }

    pub fn color(&self) -> Color {
        let (r, g, b) = self.rgb();
        Color::srgb_u8(r, g, b)
    }

    /// Text color that stays readable on top of this color.
    pub fn contrast_text(&self) -> Color {
        match self {
            SnakeColor::Yellow => Color::BLACK,
            _ => Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hex_matches_rgb() {
        for color in SnakeColor::ALL {
            let (r, g, b) = color.rgb();
            assert_eq!(color.hex(), format!("#{r:02x}{g:02x}{b:02x}"));
        }
    }

    #[test]
    fn distinct_colors() {
        for (i, c1) in SnakeColor::ALL.iter().enumerate() {
            for (j, c2) in SnakeColor::ALL.iter().enumerate() {
                if i != j {
                    assert!(c1.hex() != c2.hex(), "duplicate colors at {i} and {j}");
                }
            }
        }
    }

    #[test]
    fn random_covers_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let color = SnakeColor::random(&mut rng);
            let idx = SnakeColor::ALL.iter().position(|c| *c == color).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn yellow_uses_dark_text() {
        assert_eq!(SnakeColor::Yellow.contrast_text(), Color::BLACK);
        assert_eq!(SnakeColor::Red.contrast_text(), Color::WHITE);
        assert_eq!(SnakeColor::default(), SnakeColor::Red);
    }
}
