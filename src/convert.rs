//! Conversions between the RGB, HSB and hex forms of a color.
//!
//! All conversions work on integer channels and round the same way the
//! picker displays values, so converting a color and reading the fields back
//! never shows digits that the conversion itself could not produce.
//!
//! ```rust
//! use colorpick::{Hsb, Rgb};
//! let orange = Rgb::new(255, 102, 0);
//! assert_eq!(orange.to_hsb(), Hsb::new(24, 100, 100));
//! assert_eq!(orange.to_hsb().to_rgb(), orange);
//! assert_eq!(orange.to_hex(), "#ff6600");
//! ```

use crate::models::{Hsb, Rgb};

impl Rgb {
    /// Convert this color to the HSB notation.
    pub fn to_hsb(&self) -> Hsb {
        util::rgb_to_hsb(self)
    }

    /// Format this color as a 6 digit lowercase hex string with a leading `#`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl Hsb {
    /// Convert this color from the HSB notation to RGB channels.
    pub fn to_rgb(&self) -> Rgb {
        util::hsb_to_rgb(self)
    }
}

mod util {
    use crate::models::{Hsb, Rgb};

    fn to_channel(value: f64) -> u8 {
        value.round().clamp(0.0, 255.0) as u8
    }

    /// Convert from RGB channels to HSB, rounding each component to an
    /// integer. A hue that rounds up to a full turn is reported as 0.
    pub fn rgb_to_hsb(from: &Rgb) -> Hsb {
        let red = f64::from(from.red);
        let green = f64::from(from.green);
        let blue = f64::from(from.blue);

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        let brightness = max / 255.0;
        let saturation = if max != 0.0 { delta / max } else { 0.0 };

        let hue = if saturation != 0.0 {
            let rr = (max - red) / delta;
            let gr = (max - green) / delta;
            let br = (max - blue) / delta;

            let hue = if red == max {
                br - gr
            } else if green == max {
                2.0 + rr - br
            } else {
                4.0 + gr - rr
            } / 6.0;

            if hue < 0.0 {
                hue + 1.0
            } else {
                hue
            }
        } else {
            0.0
        };

        Hsb::new(
            ((hue * 360.0).round() as u16) % 360,
            (saturation * 100.0).round() as u8,
            (brightness * 100.0).round() as u8,
        )
    }

    /// Convert from HSB to RGB channels using the six 60 degree sectors of
    /// the hue circle.
    pub fn hsb_to_rgb(from: &Hsb) -> Rgb {
        let saturation = f64::from(from.saturation);
        let brightness = f64::from(from.brightness);

        let br = to_channel(brightness / 100.0 * 255.0);
        if from.saturation == 0 {
            return Rgb::new(br, br, br);
        }

        let hue = f64::from(from.hue % 360);
        let f = hue % 60.0;

        let p = to_channel(brightness * (100.0 - saturation) / 10_000.0 * 255.0);
        let q = to_channel(brightness * (6000.0 - saturation * f) / 600_000.0 * 255.0);
        let t = to_channel(brightness * (6000.0 - saturation * (60.0 - f)) / 600_000.0 * 255.0);

        let (red, green, blue) = match from.hue % 360 / 60 {
            0 => (br, t, p),
            1 => (q, br, p),
            2 => (p, br, t),
            3 => (p, q, br),
            4 => (t, p, br),
            _ => (br, p, q),
        };

        Rgb::new(red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        #[rustfmt::skip]
        const TESTS: &[((u8, u8, u8), (u16, u8, u8))] = &[
            ((255, 102,   0), ( 24, 100, 100)),
            ((255,   0,   0), (  0, 100, 100)),
            ((  0, 255,   0), (120, 100, 100)),
            ((  0,   0, 255), (240, 100, 100)),
            ((255, 255,   0), ( 60, 100, 100)),
            ((  0, 255, 255), (180, 100, 100)),
            ((255,   0, 255), (300, 100, 100)),
            ((255, 255, 255), (  0,   0, 100)),
            ((  0,   0,   0), (  0,   0,   0)),
            ((128, 128, 128), (  0,   0,  50)),
        ];

        for &(rgb, hsb) in TESTS {
            let rgb = Rgb::from(rgb);
            let hsb = Hsb::from(hsb);
            assert_eq!(rgb.to_hsb(), hsb, "{rgb:?} -> hsb");
            assert_eq!(hsb.to_rgb(), rgb, "{hsb:?} -> rgb");
        }
    }

    #[test]
    fn hue_rounding_up_to_a_full_turn_is_zero() {
        // hue is 359.76 degrees before rounding
        assert_eq!(Rgb::new(255, 0, 1).to_hsb().hue, 0);
    }

    #[test]
    fn reduced_saturation_keeps_hue() {
        let rgb = Hsb::new(24, 50, 100).to_rgb();
        assert_eq!(rgb.red, 255);
        assert_eq!(rgb.blue, 128);
        assert!(rgb.green > rgb.blue && rgb.green < rgb.red);
    }

    #[test]
    fn grays_and_primaries_round_trip_within_one() {
        let mut samples = (0..=255u8).map(|v| Rgb::new(v, v, v)).collect::<Vec<_>>();
        samples.extend((0..=255u8).map(|v| Rgb::new(v, 0, 0)));
        samples.extend((0..=255u8).map(|v| Rgb::new(0, v, 0)));
        samples.extend((0..=255u8).map(|v| Rgb::new(0, 0, v)));

        for rgb in samples {
            let back = rgb.to_hsb().to_rgb();
            for (a, b) in rgb.to_array().into_iter().zip(back.to_array()) {
                assert!((a - b).abs() <= 1, "{rgb:?} came back as {back:?}");
            }
        }
    }

    #[test]
    fn any_color_round_trips_within_hsb_quantization() {
        // Integer HSB can move a channel by at most 5 when converted back:
        // half a percent of brightness and saturation plus half a degree of
        // hue, each scaled to 255, plus the final rounding.
        for red in (0..=255u8).step_by(15) {
            for green in (0..=255u8).step_by(15) {
                for blue in (0..=255u8).step_by(15) {
                    let rgb = Rgb::new(red, green, blue);
                    let back = rgb.to_hsb().to_rgb();
                    for (a, b) in rgb.to_array().into_iter().zip(back.to_array()) {
                        assert!((a - b).abs() <= 5, "{rgb:?} came back as {back:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
    }
}
