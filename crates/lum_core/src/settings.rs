//! Acceleration structure configuration.

/// Default leaf capacity of the bounding-box hierarchy.
pub const DEFAULT_MAX_PRIMS_IN_NODE: u8 = 10;

/// How the bounding-box hierarchy chooses where to split a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SplitMethod {
    /// Surface area heuristic: minimize `area(L) * |L| + area(R) * |R|`.
    #[default]
    Sah,

    /// Split at the spatial midpoint of the primitive centroids along the
    /// current axis.
    ///
    /// This is the midpoint of the centroid range, not an even N/2 split of
    /// the sorted list (that is [`SplitMethod::EqualCounts`]). When every
    /// centroid falls on one side of the midpoint the split falls back to N/2.
    Middle,

    /// Split the sorted primitives into two equally sized halves.
    EqualCounts,
}

impl SplitMethod {
    /// Parse a split method name. Unknown names fall back to SAH.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sah" => SplitMethod::Sah,
            "middle" => SplitMethod::Middle,
            "equal" | "equal_counts" => SplitMethod::EqualCounts,
            sm => {
                log::warn!("BBH split method '{}' unknown.  Using 'sah'.", sm);
                SplitMethod::Sah
            }
        }
    }
}

/// Which accelerator a scene registers its surfaces with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AcceleratorSettings {
    /// Linear scan over every primitive.
    #[default]
    Naive,

    /// Bounding-box hierarchy.
    Bbh {
        max_prims_in_node: u8,
        split_method: SplitMethod,
    },
}

impl AcceleratorSettings {
    /// BBH settings with the leaf capacity clamped into `[1, 255]`.
    pub fn bbh(max_prims_in_node: i64, split_method: SplitMethod) -> Self {
        let clamped = max_prims_in_node.clamp(1, u8::MAX as i64);
        if clamped != max_prims_in_node {
            log::warn!(
                "maxPrimsInNode {} out of range, using {}",
                max_prims_in_node,
                clamped
            );
        }
        AcceleratorSettings::Bbh {
            max_prims_in_node: clamped as u8,
            split_method,
        }
    }
}
