//! Model a color with the HSB (hue, saturation, brightness) notation.

colorpick_macros::gen_channels! {
    /// A color specified with the HSB notation. Hue is in degrees, saturation
    /// and brightness in percent.
    pub struct Hsb {
        /// The hue in degrees. Usually below 360, but a configured hue bound
        /// may admit larger values which convert modulo 360.
        hue: u16,
        /// The saturation in `0..=100`.
        saturation: u8,
        /// The brightness in `0..=100`.
        brightness: u8,
    }
}

impl Hsb {
    /// Build an HSB triple from unchecked integers. Saturation and brightness
    /// are clamped to `0..=100`; a hue outside `0..360` is folded into it.
    pub fn normalized(hue: i64, saturation: i64, brightness: i64) -> Self {
        Self::within(hue, saturation, brightness, 359)
    }

    /// Like [`Hsb::normalized`], but a hue up to `hue_max` is kept as is.
    /// Used for hue fields whose configured bound reaches past 359.
    pub(crate) fn within(hue: i64, saturation: i64, brightness: i64, hue_max: i64) -> Self {
        let percent = |value: i64| value.clamp(0, 100) as u8;
        let bound = hue_max.clamp(359, i64::from(u16::MAX));
        let hue = if (0..=bound).contains(&hue) {
            hue
        } else {
            hue.rem_euclid(360)
        };

        Self::new(hue as u16, percent(saturation), percent(brightness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_percentages() {
        assert_eq!(Hsb::normalized(10, 101, -3), Hsb::new(10, 100, 0));
    }

    #[test]
    fn normalized_folds_out_of_range_hue() {
        assert_eq!(Hsb::normalized(-90, 50, 50).hue, 270);
        assert_eq!(Hsb::normalized(360, 50, 50).hue, 0);
        assert_eq!(Hsb::normalized(720, 50, 50).hue, 0);
        assert_eq!(Hsb::normalized(1000, 50, 50).hue, 280);
        assert_eq!(Hsb::normalized(70_000, 50, 50).hue, 160);
    }

    #[test]
    fn within_keeps_hues_up_to_the_bound() {
        assert_eq!(Hsb::within(360, 50, 50, 360).hue, 360);
        assert_eq!(Hsb::within(366, 50, 50, 366).hue, 366);
        assert_eq!(Hsb::within(367, 50, 50, 366).hue, 7);
        assert_eq!(Hsb::within(-1, 50, 50, 366).hue, 359);
        // A bound below a full turn still keeps every hue of the circle.
        assert_eq!(Hsb::within(300, 50, 50, 255).hue, 300);
    }
}
