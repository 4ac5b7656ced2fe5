//! Image region collection and filtering.
//!
//! Every image placement becomes an [`ImageRegion`]. Once all placements of
//! a document are known, [`filter_regions`] removes tiles of split images,
//! icon-sized images and images drawn more than once at the same position.

use crate::event::{PageEvent, PageEvents};
use crate::geometry::Ctm;

/// Gap below which two aligned images count as tiles of one image.
pub const DEFAULT_ADJACENCY_THRESHOLD: f32 = 2.0;
/// Images narrower or shorter than this are treated as decoration.
pub const DEFAULT_MIN_SIZE: f32 = 50.0;

/// Placement of a raster image in page space, as reported by the
/// interpreter. Forms are already flattened by then.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ImagePlacement {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Placement of the unit image square under `ctm`.
    ///
    /// Origin is the CTM translation; size is its scaling factors.
    pub fn from_ctm(ctm: &Ctm) -> Self {
        Self::new(
            ctm.translate_x(),
            ctm.translate_y(),
            ctm.scaling_factor_x(),
            ctm.scaling_factor_y(),
        )
    }
}

/// One placed image on a page.
///
/// Equality is exact on all five fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRegion {
    /// 1-based page index.
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ImageRegion {
    pub fn new(page: usize, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            page,
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from a placement, optionally flipping `y` to a
    /// top-left origin using the page height.
    pub fn from_placement(page: usize, placement: &ImagePlacement, flip_height: Option<f32>) -> Self {
        let y = match flip_height {
            Some(page_height) => page_height - (placement.y + placement.height),
            None => placement.y,
        };
        Self::new(page, placement.x, y, placement.width, placement.height)
    }

    /// Same position and size, ignoring the page.
    pub fn same_box(&self, other: &ImageRegion) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }

    /// Whether `other` is an aligned neighbour separated by a gap in
    /// `(0, threshold)`.
    ///
    /// Vertical neighbours share `x` and `width`; horizontal neighbours
    /// share `y` and `height`. Pages are not compared here.
    pub fn is_adjacent_to(&self, other: &ImageRegion, threshold: f32) -> bool {
        let in_gap = |gap: f32| 0.0 < gap && gap < threshold;
        let stacked = self.x == other.x
            && self.width == other.width
            && (in_gap(self.y - (other.y + other.height))
                || in_gap(other.y - (self.y + self.height)));
        let side_by_side = self.y == other.y
            && self.height == other.height
            && (in_gap(self.x - (other.x + other.width))
                || in_gap(other.x - (self.x + self.width)));
        stacked || side_by_side
    }
}

/// Which regions the duplicate filter compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplicateScope {
    /// Remove regions repeated at the same position on one page (default).
    #[default]
    SamePage,
    /// Remove regions repeated at the same position on *other* pages, such
    /// as running logos. Repeats within a page are kept.
    CrossPage,
}

/// Options for [`filter_regions`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionFilterOptions {
    /// Exclusive upper bound of the gap between adjacent tiles.
    pub adjacency_threshold: f32,
    /// Minimum width and height of a kept region.
    pub min_size: f32,
    /// Scope of the duplicate-position filter.
    pub duplicate_scope: DuplicateScope,
    /// Flip `y` to a top-left origin when the page height is known.
    pub flip_y: bool,
}

impl Default for RegionFilterOptions {
    fn default() -> Self {
        Self {
            adjacency_threshold: DEFAULT_ADJACENCY_THRESHOLD,
            min_size: DEFAULT_MIN_SIZE,
            duplicate_scope: DuplicateScope::SamePage,
            flip_y: false,
        }
    }
}

/// Run the three filter stages: adjacency, small size, duplicate position.
///
/// Every region that is adjacent to another region of its page is removed,
/// both sides of the pair included. Surviving regions keep their input
/// order. The pass is idempotent.
pub fn filter_regions(regions: &[ImageRegion], options: &RegionFilterOptions) -> Vec<ImageRegion> {
    let spread = drop_adjacent(regions, options.adjacency_threshold);
    let sized = drop_small(spread, options.min_size);
    let unique = drop_duplicates(&sized, options.duplicate_scope);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        input = regions.len(),
        after_small = sized.len(),
        kept = unique.len(),
        "image regions filtered"
    );

    unique
}

fn drop_adjacent(regions: &[ImageRegion], threshold: f32) -> Vec<ImageRegion> {
    let mut adjacent = vec![false; regions.len()];
    for (i, region) in regions.iter().enumerate() {
        for (j, other) in regions.iter().enumerate().skip(i + 1) {
            if region.page != other.page || region.same_box(other) {
                continue;
            }
            if region.is_adjacent_to(other, threshold) {
                adjacent[i] = true;
                adjacent[j] = true;
            }
        }
    }
    regions
        .iter()
        .zip(adjacent)
        .filter(|(_, flagged)| !flagged)
        .map(|(region, _)| *region)
        .collect()
}

fn drop_small(regions: Vec<ImageRegion>, min_size: f32) -> Vec<ImageRegion> {
    regions
        .into_iter()
        .filter(|r| !(r.width < min_size || r.height < min_size))
        .collect()
}

fn drop_duplicates(regions: &[ImageRegion], scope: DuplicateScope) -> Vec<ImageRegion> {
    regions
        .iter()
        .enumerate()
        .filter(|&(i, region)| {
            !regions.iter().enumerate().any(|(j, other)| {
                let same_page = region.page == other.page;
                let scoped = match scope {
                    DuplicateScope::SamePage => same_page,
                    DuplicateScope::CrossPage => !same_page,
                };
                i != j && scoped && region.same_box(other)
            })
        })
        .map(|(_, region)| *region)
        .collect()
}

/// Accumulates image regions for a whole document.
#[derive(Debug, Clone, Default)]
pub struct RegionCollector {
    options: RegionFilterOptions,
    regions: Vec<ImageRegion>,
}

impl RegionCollector {
    pub fn new(options: RegionFilterOptions) -> Self {
        Self {
            options,
            regions: Vec::new(),
        }
    }

    /// Record a placement on `page` (1-based) of the given height.
    pub fn push(&mut self, page: usize, placement: &ImagePlacement, page_height: f32) {
        let flip = self.options.flip_y.then_some(page_height);
        self.regions
            .push(ImageRegion::from_placement(page, placement, flip));
    }

    /// Regions recorded so far, unfiltered.
    pub fn regions(&self) -> &[ImageRegion] {
        &self.regions
    }

    /// Filter the recorded regions and return the survivors.
    pub fn finish(self) -> Vec<ImageRegion> {
        filter_regions(&self.regions, &self.options)
    }
}

/// Collect and filter the image placements of a document's pages.
pub fn collect(pages: &[PageEvents], options: &RegionFilterOptions) -> Vec<ImageRegion> {
    let mut collector = RegionCollector::new(options.clone());
    for page in pages {
        for sequenced in &page.events {
            if let PageEvent::ImagePlacement(placement) = &sequenced.event {
                collector.push(page.page, placement, page.height);
            }
        }
    }
    collector.finish()
}
