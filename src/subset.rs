// Subset views — index-mapped slices of a parent dataset

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::coco::CocoTrainDataset;
use crate::dataset::{Dataset, LabeledSample};
use crate::error::{DataError, Result};
use crate::transform::Transform;

/// A read-only view of selected positions in a parent dataset.
///
/// The view owns nothing but its index list: `indices[i]` is the parent
/// position backing the view's own position `i`. No file scanning or data
/// copying happens here.
pub struct Subset<'a, D: Dataset> {
    /// The dataset being viewed.
    pub dataset: &'a D,
    /// Ordered parent positions, one per subset position.
    pub indices: Vec<usize>,
}

impl<'a, D: Dataset> Subset<'a, D> {
    /// Create a view of `dataset` containing only the samples at `indices`.
    pub fn new(dataset: &'a D, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    /// Translate a subset position to the parent position behind it.
    fn parent_index(&self, index: usize) -> Result<usize> {
        match self.indices.get(index) {
            Some(&i) => Ok(i),
            None => Err(DataError::IndexOutOfRange {
                index,
                len: self.indices.len(),
            }),
        }
    }
}

impl<D: Dataset> Dataset for Subset<'_, D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Result<D::Item> {
        let parent = self.parent_index(index)?;
        self.dataset.get(parent)
    }

    fn name(&self) -> &str {
        "subset"
    }
}

// Train / validation split

/// Split a dataset into reproducibly shuffled [`Subset`] views.
///
/// # Arguments
/// * `dataset` — the source dataset
/// * `ratios` — slice of 2 or 3 floats that sum to 1.0, e.g. `[0.8, 0.2]`
/// * `seed` — random seed for reproducible shuffling of indices
///
/// The last split absorbs any rounding remainder, so the views always
/// partition `0..dataset.len()`.
///
/// # Panics
/// Panics if `ratios` has fewer than 2 or more than 3 entries, or if the
/// entries do not sum to 1.0.
pub fn random_split<'a, D: Dataset>(
    dataset: &'a D,
    ratios: &[f64],
    seed: u64,
) -> Vec<Subset<'a, D>> {
    assert!(
        ratios.len() >= 2 && ratios.len() <= 3,
        "random_split: ratios must have 2 or 3 elements"
    );
    let sum: f64 = ratios.iter().sum();
    assert!(
        (sum - 1.0).abs() < 1e-6,
        "random_split: ratios must sum to 1.0, got {}",
        sum
    );

    let n = dataset.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut splits = Vec::new();
    let mut offset = 0;
    for (i, &ratio) in ratios.iter().enumerate() {
        let count = if i == ratios.len() - 1 {
            n - offset // give remainder to last split
        } else {
            (n as f64 * ratio).round() as usize
        };
        let end = (offset + count).min(n);
        splits.push(Subset::new(dataset, indices[offset..end].to_vec()));
        offset = end;
    }

    splits
}

// ValidationDataset

/// Validation adapter over a subset of a training dataset.
///
/// Samples are read through the parent's raw retrieval path, bypassing the
/// parent's (training) transform; the validation transform set here is
/// applied instead. Everything else about retrieval is shared with the
/// parent, down to the path derivation and multi-hot construction.
pub struct ValidationDataset<'a> {
    subset: Subset<'a, CocoTrainDataset>,
    transform: Option<Box<dyn Transform>>,
}

impl<'a> ValidationDataset<'a> {
    /// Wrap a subset view of a training dataset.
    pub fn new(subset: Subset<'a, CocoTrainDataset>) -> Self {
        Self {
            subset,
            transform: None,
        }
    }

    /// Apply `t` to every image returned by `get`.
    pub fn with_transform<T: Transform + 'static>(mut self, t: T) -> Self {
        self.transform = Some(Box::new(t));
        self
    }
}

impl Dataset for ValidationDataset<'_> {
    type Item = LabeledSample;

    fn len(&self) -> usize {
        self.subset.len()
    }

    fn get(&self, index: usize) -> Result<LabeledSample> {
        let parent = self.subset.parent_index(index)?;
        let mut sample = self.subset.dataset.raw_sample(parent)?;
        if let Some(t) = &self.transform {
            sample.image = t.apply(sample.image);
        }
        Ok(sample)
    }

    fn name(&self) -> &str {
        "coco-val"
    }
}
