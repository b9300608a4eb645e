// Dataset trait — unified interface for the random-access adapters

use image::RgbImage;
use ndarray::Array1;

use crate::error::Result;

/// A decoded training sample: an RGB image paired with its multi-hot
/// label vector.
///
/// The vector always has length [`NUM_CLASSES`](crate::coco::NUM_CLASSES),
/// with 1.0 at each class index listed in the sample's label file and 0.0
/// everywhere else. Duplicate indices in the label file collapse into the
/// same slot.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    /// Decoded 3-channel image, transformed if a transform was injected.
    pub image: RgbImage,
    /// Multi-hot class vector.
    pub labels: Array1<f32>,
}

/// A decoded test sample: an RGB image paired with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSample {
    /// Decoded 3-channel image, transformed if a transform was injected.
    pub image: RgbImage,
    /// Filename stem of the source image, used to pair predictions with
    /// their source files at inference time.
    pub id: String,
}

/// An ordered, fixed-size collection of samples addressed by index.
///
/// Implementations must be `Send + Sync`: external batching harnesses call
/// `get` from multiple workers, which is safe because every adapter here
/// only reads immutable on-disk state and allocates fresh local data per
/// call.
pub trait Dataset: Send + Sync {
    /// The sample type this dataset yields.
    type Item;

    /// Total number of samples.
    fn len(&self) -> usize;

    /// Whether the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve the sample at position `index`.
    ///
    /// Fails with `DataError::IndexOutOfRange` if `index >= self.len()`,
    /// and with a decode or parse error if the backing files cannot be
    /// read. Every call re-reads from disk; nothing is cached.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Optional human-readable name.
    fn name(&self) -> &str {
        "dataset"
    }
}
