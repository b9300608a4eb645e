// COCO-style adapters — directory-backed multi-label image datasets
//
// Expected on-disk layout:
//
//   images/        000123.jpg  000124.jpg  ...
//   annotations/   000123.cls  000124.cls  ...
//
// Each `.cls` file lists one integer class index per line, every index in
// [0, 80). A training sample pairs the decoded image with an 80-slot
// multi-hot vector over those indices; a test sample pairs the image with
// its filename stem.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use ndarray::Array1;

use crate::dataset::{Dataset, LabeledSample, TestSample};
use crate::error::{DataError, Result};
use crate::transform::Transform;

/// Number of COCO object classes. Every label vector has exactly this
/// length regardless of how many labels a sample carries.
pub const NUM_CLASSES: usize = 80;

/// Extension of per-image label files.
pub const LABEL_EXT: &str = "cls";

/// Extension of image files.
pub const IMAGE_EXT: &str = "jpg";

/// List the file names in `dir` carrying the given extension
/// (case-insensitive), sorted lexicographically.
fn scan_dir(dir: &Path, ext: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(DataError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let io_err = |source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut keys = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false);
        if matches_ext && path.is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                keys.push(name.to_string());
            }
        }
    }
    keys.sort();
    Ok(keys)
}

/// Decode an image file to a fixed 3-channel representation.
fn decode_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| DataError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Read a label file and scatter its class indices into a fresh
/// multi-hot vector of length [`NUM_CLASSES`].
fn read_multi_hot(path: &Path) -> Result<Array1<f32>> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut labels = Array1::<f32>::zeros(NUM_CLASSES);
    for (lineno, line) in content.lines().enumerate() {
        let label: usize = line.trim().parse().map_err(|source| DataError::LabelParse {
            path: path.to_path_buf(),
            line: lineno + 1,
            source,
        })?;
        if label >= NUM_CLASSES {
            return Err(DataError::LabelOutOfRange {
                label,
                num_classes: NUM_CLASSES,
                path: path.to_path_buf(),
            });
        }
        labels[label] = 1.0;
    }
    Ok(labels)
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(DataError::IndexOutOfRange { index, len });
    }
    Ok(())
}

// CocoTrainDataset

/// Builder for [`CocoTrainDataset`].
pub struct CocoTrainDatasetBuilder {
    img_dir: PathBuf,
    labels_dir: PathBuf,
    max_images: Option<usize>,
    transform: Option<Box<dyn Transform>>,
}

impl CocoTrainDatasetBuilder {
    /// Keep only the first `n` label files (in sorted order).
    pub fn max_images(mut self, n: usize) -> Self {
        self.max_images = Some(n);
        self
    }

    /// Apply `t` to every image returned by `get`.
    pub fn transform<T: Transform + 'static>(mut self, t: T) -> Self {
        self.transform = Some(Box::new(t));
        self
    }

    /// Scan the label directory and build the dataset.
    pub fn build(self) -> Result<CocoTrainDataset> {
        if !self.img_dir.is_dir() {
            return Err(DataError::NotADirectory { path: self.img_dir });
        }
        let mut keys = scan_dir(&self.labels_dir, LABEL_EXT)?;
        if let Some(n) = self.max_images {
            keys.truncate(n);
        }
        Ok(CocoTrainDataset {
            img_dir: self.img_dir,
            labels_dir: self.labels_dir,
            keys,
            transform: self.transform,
        })
    }
}

/// Training adapter: pairs each label file in the annotation directory with
/// its image and yields (image, multi-hot vector) samples.
///
/// The key sequence is listed and sorted once at construction and never
/// mutated; every `get` re-reads and re-decodes the backing files.
pub struct CocoTrainDataset {
    img_dir: PathBuf,
    labels_dir: PathBuf,
    keys: Vec<String>,
    transform: Option<Box<dyn Transform>>,
}

impl fmt::Debug for CocoTrainDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CocoTrainDataset")
            .field("img_dir", &self.img_dir)
            .field("labels_dir", &self.labels_dir)
            .field("keys", &self.keys)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl CocoTrainDataset {
    /// Start building a dataset over the given image and label directories.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        img_dir: P,
        labels_dir: Q,
    ) -> CocoTrainDatasetBuilder {
        CocoTrainDatasetBuilder {
            img_dir: img_dir.as_ref().to_path_buf(),
            labels_dir: labels_dir.as_ref().to_path_buf(),
            max_images: None,
            transform: None,
        }
    }

    /// The sorted label-file names backing this dataset.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Image path for a label key: the key's stem + `.jpg` in the image
    /// directory.
    fn image_path(&self, key: &str) -> PathBuf {
        let stem = Path::new(key)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(key);
        self.img_dir.join(format!("{stem}.{IMAGE_EXT}"))
    }

    /// Load the sample at `index` without applying the transform.
    ///
    /// This is the single retrieval path: [`get`](Dataset::get) and
    /// [`ValidationDataset`](crate::subset::ValidationDataset) both go
    /// through it, so a subset view reads samples exactly as its parent
    /// would.
    pub fn raw_sample(&self, index: usize) -> Result<LabeledSample> {
        check_index(index, self.keys.len())?;
        let key = &self.keys[index];
        let image = decode_rgb(&self.image_path(key))?;
        let labels = read_multi_hot(&self.labels_dir.join(key))?;
        Ok(LabeledSample { image, labels })
    }
}

impl Dataset for CocoTrainDataset {
    type Item = LabeledSample;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn get(&self, index: usize) -> Result<LabeledSample> {
        let mut sample = self.raw_sample(index)?;
        if let Some(t) = &self.transform {
            sample.image = t.apply(sample.image);
        }
        Ok(sample)
    }

    fn name(&self) -> &str {
        "coco-train"
    }
}

// CocoTestDataset

/// Builder for [`CocoTestDataset`].
pub struct CocoTestDatasetBuilder {
    img_dir: PathBuf,
    transform: Option<Box<dyn Transform>>,
}

impl CocoTestDatasetBuilder {
    /// Apply `t` to every image returned by `get`.
    pub fn transform<T: Transform + 'static>(mut self, t: T) -> Self {
        self.transform = Some(Box::new(t));
        self
    }

    /// Scan the image directory and build the dataset.
    pub fn build(self) -> Result<CocoTestDataset> {
        let keys = scan_dir(&self.img_dir, IMAGE_EXT)?;
        Ok(CocoTestDataset {
            img_dir: self.img_dir,
            keys,
            transform: self.transform,
        })
    }
}

/// Test-time adapter: yields (image, identifier) samples with no labels.
/// The identifier is the image's filename stem.
pub struct CocoTestDataset {
    img_dir: PathBuf,
    keys: Vec<String>,
    transform: Option<Box<dyn Transform>>,
}

impl fmt::Debug for CocoTestDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CocoTestDataset")
            .field("img_dir", &self.img_dir)
            .field("keys", &self.keys)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl CocoTestDataset {
    /// Start building a dataset over the given image directory.
    pub fn new<P: AsRef<Path>>(img_dir: P) -> CocoTestDatasetBuilder {
        CocoTestDatasetBuilder {
            img_dir: img_dir.as_ref().to_path_buf(),
            transform: None,
        }
    }

    /// The sorted image file names backing this dataset.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Dataset for CocoTestDataset {
    type Item = TestSample;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn get(&self, index: usize) -> Result<TestSample> {
        check_index(index, self.keys.len())?;
        let key = &self.keys[index];
        let mut image = decode_rgb(&self.img_dir.join(key))?;
        if let Some(t) = &self.transform {
            image = t.apply(image);
        }
        let id = Path::new(key)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(key.as_str())
            .to_string();
        Ok(TestSample { image, id })
    }

    fn name(&self) -> &str {
        "coco-test"
    }
}
