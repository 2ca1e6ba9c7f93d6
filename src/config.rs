//! Decoder configuration.

/// Default cap on person columns in tabular output.
pub const DEFAULT_MAX_PERSONS: usize = 5;

/// Default half-width of the closed coordinate range used by the aggregator.
pub const DEFAULT_COORDINATE_LIMIT: f64 = 10.0;

/// Which payload shape a capture carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// 25-byte point records after a 24-byte header
    #[default]
    PointCloud,
    /// 32-byte person records after a block-aligned header
    PersonTracking,
}

/// Header layout of person-tracking captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonLayout {
    /// Line starts at the TLV2 sentinel: `TLV2, NumPeople` then persons
    Debug2,
    /// Full frame: two header blocks, length, counter, TLV1, zero block, TLV2, NumPeople
    #[default]
    Debug3,
}

impl PersonLayout {
    /// Number of 4-byte blocks preceding the first person record.
    pub fn header_blocks(self) -> usize {
        match self {
            PersonLayout::Debug2 => 2,
            PersonLayout::Debug3 => 8,
        }
    }
}

/// Settings shared by every stage of the decode pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    pub mode: FrameMode,
    pub person_layout: PersonLayout,
    /// Persons kept per frame for the fixed-width person table
    pub max_persons: usize,
    /// Points qualify for averaging only if every axis lies in `[-limit, limit]`
    pub coordinate_limit: f64,
}

impl DecoderConfig {
    /// Creates a configuration for the given mode with default settings.
    pub fn new(mode: FrameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_person_layout(mut self, layout: PersonLayout) -> Self {
        self.person_layout = layout;
        self
    }

    pub fn with_max_persons(mut self, max_persons: usize) -> Self {
        self.max_persons = max_persons;
        self
    }

    pub fn with_coordinate_limit(mut self, limit: f64) -> Self {
        self.coordinate_limit = limit.abs();
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            mode: FrameMode::default(),
            person_layout: PersonLayout::default(),
            max_persons: DEFAULT_MAX_PERSONS,
            coordinate_limit: DEFAULT_COORDINATE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.mode, FrameMode::PointCloud);
        assert_eq!(config.person_layout, PersonLayout::Debug3);
        assert_eq!(config.max_persons, 5);
        assert_eq!(config.coordinate_limit, 10.0);
    }

    #[test]
    fn test_builder_methods() {
        let config = DecoderConfig::new(FrameMode::PersonTracking)
            .with_person_layout(PersonLayout::Debug2)
            .with_max_persons(3)
            .with_coordinate_limit(-4.0);

        assert_eq!(config.mode, FrameMode::PersonTracking);
        assert_eq!(config.person_layout.header_blocks(), 2);
        assert_eq!(config.max_persons, 3);
        assert_eq!(config.coordinate_limit, 4.0);
    }
}
