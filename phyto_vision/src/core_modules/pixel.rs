// THEORY:
// `Pixel` is the smallest unit of the vision system: a "dumb" container for one
// 8-bit RGB sample. It carries no heuristics of its own. Colour-space work lives
// in `hsv`, where each pixel is re-expressed as hue/saturation/value before any
// disease signature is tested.
//
// Alpha is never stored. A leaf photograph is analyzed as it would appear on an
// opaque background, so transparency is dropped at decode time.

pub type Byte = u8;
pub type Channel = Byte;

/// Number of interleaved channels per pixel in a packed buffer.
pub const CHANNELS: usize = 3;

/// A "dumb" data container representing a single RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
}

impl Pixel {
    pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
        Pixel { red, green, blue }
    }

    /// Brightest channel, which is also the HSV value.
    #[inline]
    pub fn max_channel(&self) -> Channel {
        self.red.max(self.green.max(self.blue))
    }

    /// Dimmest channel.
    #[inline]
    pub fn min_channel(&self) -> Channel {
        self.red.min(self.green.min(self.blue))
    }
}

impl From<[Byte; CHANNELS]> for Pixel {
    fn from(bytes: [Byte; CHANNELS]) -> Self {
        Pixel::new(bytes[0], bytes[1], bytes[2])
    }
}

impl From<Pixel> for [Byte; CHANNELS] {
    fn from(pixel: Pixel) -> Self {
        [pixel.red, pixel.green, pixel.blue]
    }
}
