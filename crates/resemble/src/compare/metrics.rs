use std::time::Duration;

use serde::{Serialize, Serializer};

use super::composite::{CompositeOutcome, DiffBounds};
use crate::sink::DiffImage;

/// Signed size difference, first image minus second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionDifference {
    pub width: i64,
    pub height: i64,
}

/// Final record of a pixel comparison.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    #[serde(rename = "rawMisMatchPercentage")]
    pub raw_mismatch_percentage: f64,
    /// `raw_mismatch_percentage` rounded to two decimals. Serialized as a
    /// fixed two-decimal string, e.g. `"0.00"`.
    #[serde(rename = "misMatchPercentage", serialize_with = "as_fixed2")]
    pub mismatch_percentage: f64,
    #[serde(rename = "misMatchCount")]
    pub mismatch_count: u64,
    pub is_same_dimensions: bool,
    pub dimension_difference: DimensionDifference,
    pub diff_bounds: DiffBounds,
    /// Compositor wall clock only; image loading is excluded.
    #[serde(serialize_with = "as_millis")]
    pub analysis_time: Duration,
    #[serde(skip)]
    pub diff: DiffImage,
}

impl ComparisonResult {
    /// Mismatch percentage as a two-decimal string, e.g. `"0.00"`.
    pub fn mismatch_display(&self) -> String {
        format!("{:.2}", self.raw_mismatch_percentage)
    }

    pub fn is_match(&self) -> bool {
        self.mismatch_count == 0
    }
}

/// Size facts about the two inputs, gathered before normalization.
#[derive(Debug, Clone, Copy)]
pub struct DimensionReport {
    pub is_same_dimensions: bool,
    pub dimension_difference: DimensionDifference,
}

impl DimensionReport {
    pub fn new(one: (u32, u32), two: (u32, u32)) -> Self {
        Self {
            is_same_dimensions: one == two,
            dimension_difference: DimensionDifference {
                width: i64::from(one.0) - i64::from(two.0),
                height: i64::from(one.1) - i64::from(two.1),
            },
        }
    }
}

/// Fold a compositor pass and the size report into the result record.
pub fn aggregate(outcome: CompositeOutcome, dimensions: DimensionReport) -> ComparisonResult {
    let total = outcome.diff.pixel_count();
    let raw = if total > 0 {
        outcome.mismatch_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ComparisonResult {
        raw_mismatch_percentage: raw,
        mismatch_percentage: round2(raw),
        mismatch_count: outcome.mismatch_count,
        is_same_dimensions: dimensions.is_same_dimensions,
        dimension_difference: dimensions.dimension_difference,
        diff_bounds: outcome.bounds,
        analysis_time: outcome.elapsed,
        diff: DiffImage::new(outcome.diff),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn as_fixed2<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{v:.2}"))
}

fn as_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::pixel::ImageBuffer;

    fn outcome(w: u32, h: u32, mismatches: u64) -> CompositeOutcome {
        CompositeOutcome {
            diff: ImageBuffer::transparent(w, h),
            mismatch_count: mismatches,
            bounds: DiffBounds::empty(w, h),
            elapsed: Duration::from_millis(7),
        }
    }

    #[test]
    fn percentage_and_rounding() {
        let r = aggregate(outcome(3, 1, 1), DimensionReport::new((3, 1), (3, 1)));
        assert!((r.raw_mismatch_percentage - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(r.mismatch_percentage, 33.33);
        assert_eq!(r.mismatch_display(), "33.33");
    }

    #[test]
    fn full_mismatch_is_one_hundred() {
        let r = aggregate(outcome(2, 2, 4), DimensionReport::new((2, 2), (2, 2)));
        assert_eq!(r.raw_mismatch_percentage, 100.0);
        assert_eq!(r.mismatch_display(), "100.00");
    }

    #[test]
    fn empty_canvas_is_zero_percent() {
        let r = aggregate(outcome(0, 0, 0), DimensionReport::new((0, 0), (0, 0)));
        assert_eq!(r.raw_mismatch_percentage, 0.0);
        assert!(r.is_match());
    }

    #[test]
    fn dimension_difference_is_signed() {
        let d = DimensionReport::new((10, 10), (20, 10));
        assert!(!d.is_same_dimensions);
        assert_eq!(
            d.dimension_difference,
            DimensionDifference {
                width: -10,
                height: 0
            }
        );
    }

    #[test]
    fn mismatch_percentage_serializes_as_fixed_string() {
        let r = aggregate(outcome(3, 1, 1), DimensionReport::new((3, 1), (3, 1)));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["misMatchPercentage"], "33.33");
        assert!(json["rawMisMatchPercentage"].is_f64());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let r = aggregate(outcome(2, 2, 0), DimensionReport::new((2, 2), (2, 2)));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["misMatchPercentage"], "0.00");
        assert_eq!(json["rawMisMatchPercentage"], 0.0);
        assert_eq!(json["isSameDimensions"], true);
        assert_eq!(json["analysisTime"], 7);
        assert_eq!(json["diffBounds"]["left"], 2);
        assert!(json.get("diff").is_none());
    }
}
