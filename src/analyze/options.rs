//! Pipeline configuration.

/// Options passed into every analysis stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Refine archetypes from layout groups (split heroes, card grids)
    pub high_fidelity: bool,

    /// Keep image, video and background payload in composed sections
    pub keep_media: bool,

    /// Analyze multi-page batches in parallel
    pub parallel: bool,

    /// Prepend a navbar section when the page shows navigation
    pub inject_navbar: bool,

    /// Section extraction thresholds
    pub extractor: ExtractorConfig,

    /// Maximum vertical gap (px) between sections of one visual group
    pub group_gap: f64,

    /// Composer override thresholds
    pub thresholds: ComposerThresholds,

    /// Stamp composed pages with the analysis time; off for reproducible output
    pub timestamp: bool,
}

impl PipelineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable high-fidelity layout refinement.
    pub fn with_high_fidelity(mut self, enabled: bool) -> Self {
        self.high_fidelity = enabled;
        self
    }

    /// Keep or strip media payload.
    pub fn with_keep_media(mut self, keep: bool) -> Self {
        self.keep_media = keep;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable navbar injection.
    pub fn with_navbar_injection(mut self, inject: bool) -> Self {
        self.inject_navbar = inject;
        self
    }

    /// Set extraction thresholds.
    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the grouping gap.
    pub fn with_group_gap(mut self, gap: f64) -> Self {
        self.group_gap = gap;
        self
    }

    /// Set composer thresholds.
    pub fn with_thresholds(mut self, thresholds: ComposerThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable the `analyzed_at` stamp.
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            high_fidelity: false,
            keep_media: true,
            parallel: true,
            inject_navbar: true,
            extractor: ExtractorConfig::default(),
            group_gap: 140.0,
            thresholds: ComposerThresholds::default(),
            timestamp: true,
        }
    }
}

/// Section extraction thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Minimum container height (px)
    pub min_height: f64,

    /// Absolute minimum container width (px)
    pub min_width: f64,

    /// Minimum container width as a fraction of the viewport
    pub min_width_ratio: f64,

    /// Containers overlapping an accepted one above this IoU are dropped
    pub iou_threshold: f64,

    /// Maximum atoms kept per section
    pub max_atoms: usize,

    /// Minimum atom width and height (px)
    pub min_atom_size: f64,
}

impl ExtractorConfig {
    /// Minimum width for a viewport: `max(min_width, ratio * viewport)`.
    pub fn min_width_for(&self, viewport_width: f64) -> f64 {
        self.min_width.max(viewport_width * self.min_width_ratio)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_height: 60.0,
            min_width: 320.0,
            min_width_ratio: 0.4,
            iou_threshold: 0.85,
            max_atoms: 60,
            min_atom_size: 8.0,
        }
    }
}

/// Thresholds gating lower-priority composer overrides.
///
/// Empirically tuned; adjust per corpus rather than treating them as fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerThresholds {
    /// Points the classifier's top candidate must lead the current type by
    pub score_delta: i32,

    /// Minimum atom-rule confidence
    pub rule_confidence: f64,
}

impl Default for ComposerThresholds {
    fn default() -> Self {
        Self {
            score_delta: 10,
            rule_confidence: 0.8,
        }
    }
}
