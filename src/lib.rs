//! # macaw-data
//!
//! Dataset adapters for COCO-style multi-label image classification.
//!
//! This crate provides:
//! - [`Dataset`] trait — unified length + random-access interface
//! - [`CocoTrainDataset`] — (image, multi-hot label vector) samples from
//!   paired image/annotation directories
//! - [`CocoTestDataset`] — (image, identifier) samples with no labels
//! - [`ValidationDataset`] — a subset view of a training dataset with its
//!   own transform
//! - [`Subset`] / [`random_split`] — index-mapped views and reproducible
//!   seeded splitting
//! - [`Transform`] — injected image preprocessing capability
//!
//! Every adapter is a stateless mapping from index to sample over immutable
//! on-disk files: each `get` re-reads and re-decodes from disk without any
//! caching or shared mutable state, so an external batching harness may
//! call it from multiple workers. Batching and augmentation live in that
//! harness, not here.

pub mod coco;
pub mod dataset;
pub mod error;
pub mod subset;
pub mod transform;

pub use coco::{CocoTestDataset, CocoTrainDataset, IMAGE_EXT, LABEL_EXT, NUM_CLASSES};
pub use dataset::{Dataset, LabeledSample, TestSample};
pub use error::{DataError, Result};
pub use subset::{random_split, Subset, ValidationDataset};
pub use transform::{Compose, Transform};
