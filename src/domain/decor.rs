//! Decorative backdrop marker placement.
//!
//! A fixed, hand-authored seed of marker positions is tiled downward by
//! vertical repeat offsets to cover an arbitrarily long page, then filtered
//! against the rendered document height so markers far below the fold are
//! never emitted. Expansion and filtering are recomputed on every render
//! pass; nothing is cached between calls.

/// A single decorative marker: horizontal offset, vertical offset, and
/// visual scale, all in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Marker {
    pub const fn new(x: u32, y: u32, size: u32) -> Self {
        Self { x, y, size }
    }

    fn shifted_down(self, offset: u32) -> Self {
        Self {
            y: self.y + offset,
            ..self
        }
    }
}

/// The hand-authored marker layout for the first page section.
pub const SEED_MARKERS: [Marker; 14] = [
    Marker::new(20, 160, 25),
    Marker::new(40, 80, 60),
    Marker::new(980, 830, 40),
    Marker::new(940, 880, 70),
    Marker::new(40, 1280, 35),
    Marker::new(0, 1390, 50),
    Marker::new(960, 1690, 120),
    Marker::new(80, 2060, 25),
    Marker::new(30, 2100, 60),
    Marker::new(1010, 2530, 40),
    Marker::new(950, 2650, 50),
    Marker::new(40, 3280, 35),
    Marker::new(80, 3390, 50),
    Marker::new(980, 3690, 120),
];

/// Vertical distances the seed layout is tiled down by, in order.
pub const REPEAT_OFFSETS: [u32; 2] = [3700, 8000];

/// Markers within this distance of the bottom edge are culled.
pub const DEFAULT_FOLD_MARGIN: u32 = 200;

/// Document height assumed when no rendering context is available.
pub const DEFAULT_FALLBACK_HEIGHT: u32 = 500;

/// Tile `seed` downward by each offset in turn.
///
/// Each fold appends a copy of the accumulator as it existed before the
/// fold, with every `y` increased by the offset, so the result has
/// `seed.len() * 2^offsets.len()` markers. An empty offset list is the
/// identity. Inputs are never mutated.
pub fn expand(seed: &[Marker], offsets: &[u32]) -> Vec<Marker> {
    let mut expanded = seed.to_vec();
    for &offset in offsets {
        let tiled: Vec<Marker> = expanded
            .iter()
            .map(|marker| marker.shifted_down(offset))
            .collect();
        expanded.extend(tiled);
    }
    expanded
}

/// Keep exactly the markers with `y < document_height - fold_margin`.
///
/// The threshold saturates at zero, so a document no taller than the margin
/// yields no markers at all.
pub fn visible_markers(markers: &[Marker], document_height: u32, fold_margin: u32) -> Vec<Marker> {
    let threshold = document_height.saturating_sub(fold_margin);
    markers
        .iter()
        .copied()
        .filter(|marker| marker.y < threshold)
        .collect()
}

/// Capability for measuring the hosting environment's rendered document
/// height. Returns `None` when no rendering context exists yet.
pub trait ViewportProbe {
    fn document_height(&self) -> Option<u32>;
}

/// Probe for environments without a rendering context, e.g. ahead of any
/// browser. The placer substitutes its fallback height.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessViewport;

impl ViewportProbe for HeadlessViewport {
    fn document_height(&self) -> Option<u32> {
        None
    }
}

/// Probe reporting a single measured document height.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub u32);

impl ViewportProbe for FixedViewport {
    fn document_height(&self) -> Option<u32> {
        Some(self.0)
    }
}

/// Computes the currently visible markers for a page.
///
/// Stateless apart from its configuration: every call re-expands the seed
/// and re-filters against the probed height, since the document height can
/// grow while content streams in.
#[derive(Debug, Clone)]
pub struct MarkerPlacer {
    seed: Vec<Marker>,
    offsets: Vec<u32>,
    fold_margin: u32,
    fallback_height: u32,
}

impl MarkerPlacer {
    /// Placer over the built-in seed layout and repeat offsets.
    pub fn new(fold_margin: u32, fallback_height: u32) -> Self {
        Self::with_layout(
            SEED_MARKERS.to_vec(),
            REPEAT_OFFSETS.to_vec(),
            fold_margin,
            fallback_height,
        )
    }

    pub fn with_layout(
        seed: Vec<Marker>,
        offsets: Vec<u32>,
        fold_margin: u32,
        fallback_height: u32,
    ) -> Self {
        Self {
            seed,
            offsets,
            fold_margin,
            fallback_height,
        }
    }

    pub fn place(&self, probe: &dyn ViewportProbe) -> Vec<Marker> {
        let document_height = probe.document_height().unwrap_or(self.fallback_height);
        visible_markers(
            &expand(&self.seed, &self.offsets),
            document_height,
            self.fold_margin,
        )
    }
}

impl Default for MarkerPlacer {
    fn default() -> Self {
        Self::new(DEFAULT_FOLD_MARGIN, DEFAULT_FALLBACK_HEIGHT)
    }
}
