//! Model a color as red, green and blue channels.

colorpick_macros::gen_channels! {
    /// A color specified by its red, green and blue channels, each in
    /// `0..=255`.
    pub struct Rgb {
        /// The red channel.
        red: u8,
        /// The green channel.
        green: u8,
        /// The blue channel.
        blue: u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_by_field_name() {
        let rgb = Rgb::new(1, 2, 3);
        assert_eq!(rgb.channel("Red"), Some(1));
        assert_eq!(rgb.channel("Green"), Some(2));
        assert_eq!(rgb.channel("Blue"), Some(3));
        assert_eq!(rgb.channel("red"), None);
        assert_eq!(rgb.to_array(), [1, 2, 3]);
    }

    #[test]
    fn tuple_conversions() {
        let rgb = Rgb::from((255, 102, 0));
        assert_eq!(<(u8, u8, u8)>::from(rgb), (255, 102, 0));
    }
}
