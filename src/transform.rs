// Transform — injected image preprocessing capability
//
// The adapters never implement preprocessing themselves; whatever the
// training pipeline injects (resize, normalisation, augmentation) is
// applied to each decoded image as an opaque pass-through.

use image::RgbImage;

/// An image-to-image capability applied to each sample after decoding.
pub trait Transform: Send + Sync {
    /// Apply the transform, returning the replacement image.
    fn apply(&self, image: RgbImage) -> RgbImage;
}

/// Plain closures are accepted wherever a transform is expected.
impl<F> Transform for F
where
    F: Fn(RgbImage) -> RgbImage + Send + Sync,
{
    fn apply(&self, image: RgbImage) -> RgbImage {
        self(image)
    }
}

/// Chain multiple transforms, applied in order.
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }
}

impl Transform for Compose {
    fn apply(&self, mut image: RgbImage) -> RgbImage {
        for t in &self.transforms {
            image = t.apply(image);
        }
        image
    }
}
