use crate::block_position::BlockPosition;
use crate::bounding_box::BoundingBox;
use rustc_hash::FxHashSet;

/// A two-corner selection and the cells it encloses.
///
/// `cells` is always the full inclusive box between `corner_a` and
/// `corner_b`, or empty while either corner is unset. It is rebuilt from
/// scratch on every corner change, so the cost of a corner update is
/// proportional to the selected volume. Hosts driving corners from a
/// per-frame input loop should debounce before calling in.
#[derive(Debug, Clone, Default)]
pub struct Region {
    corner_a: Option<BlockPosition>,
    corner_b: Option<BlockPosition>,
    cells: FxHashSet<BlockPosition>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_corners(a: impl Into<BlockPosition>, b: impl Into<BlockPosition>) -> Self {
        let mut region = Self::new();
        region.corner_a = Some(a.into());
        region.set_corner_b(b);
        region
    }

    pub fn set_corner_a(&mut self, pos: impl Into<BlockPosition>) {
        self.corner_a = Some(pos.into());
        self.recompute_cells();
    }

    pub fn set_corner_b(&mut self, pos: impl Into<BlockPosition>) {
        self.corner_b = Some(pos.into());
        self.recompute_cells();
    }

    pub fn corner_a(&self) -> Option<BlockPosition> {
        self.corner_a
    }

    pub fn corner_b(&self) -> Option<BlockPosition> {
        self.corner_b
    }

    pub fn has_valid_selection(&self) -> bool {
        self.corner_a.is_some() && self.corner_b.is_some()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        match (self.corner_a, self.corner_b) {
            (Some(a), Some(b)) => Some(BoundingBox::from_corners(a, b)),
            _ => None,
        }
    }

    /// Minimum corner of the selection, handed to patterns as their origin.
    pub fn origin(&self) -> Option<BlockPosition> {
        self.bounds().map(|b| b.min)
    }

    pub fn dimensions(&self) -> Option<(u64, u64, u64)> {
        self.bounds().map(|b| b.get_dimensions())
    }

    /// Copy of the enclosed cell set.
    pub fn enclosed_cells(&self) -> FxHashSet<BlockPosition> {
        self.cells.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockPosition> {
        self.cells.iter()
    }

    pub fn contains(&self, pos: BlockPosition) -> bool {
        self.cells.contains(&pos)
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.corner_a = None;
        self.corner_b = None;
        self.cells.clear();
    }

    fn recompute_cells(&mut self) {
        self.cells.clear();
        let Some(bbox) = self.bounds() else {
            return;
        };
        // Clamp the reservation; a pathological selection still materializes
        // lazily through the insert loop.
        let volume = bbox.volume().min(1 << 24) as usize;
        self.cells.reserve(volume);
        let cells = &mut self.cells;
        bbox.for_each_point(|pos| {
            cells.insert(pos);
        });
    }
}
