//! Chart input data and the price history adapter.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A single chart input in data space.
///
/// `x` orders the point, `y` is the plotted value. Two points are the same
/// point when all four fields are equal; selection relies on this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Ordering key (sequence index or scalar).
    pub x: f64,
    /// Plotted value.
    pub y: f64,
    /// X-axis label. May contain line breaks.
    pub x_label: String,
    /// Free-form value label supplied by the caller.
    #[serde(default)]
    pub y_label: String,
}

impl DataPoint {
    /// Create a new data point.
    pub fn new(x: f64, y: f64, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            x_label: x_label.into(),
            y_label: y_label.into(),
        }
    }
}

/// Find the first point equal to `point`, or `None`.
pub fn position_of(data: &[DataPoint], point: &DataPoint) -> Option<usize> {
    data.iter().position(|candidate| candidate == point)
}

/// One sample of a price history as delivered by the data layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Sample timestamp.
    pub at: DateTime<Utc>,
    /// Price in US dollars.
    pub price_usd: f64,
}

impl PriceSample {
    /// Create a new sample.
    pub fn new(at: DateTime<Utc>, price_usd: f64) -> Self {
        Self { at, price_usd }
    }

    /// Convert into a chart point labelled with hour and date (`3PM\n10/17`).
    pub fn to_data_point(&self) -> DataPoint {
        DataPoint {
            x: f64::from(self.at.hour()),
            y: self.price_usd,
            x_label: self.at.format("%-I%p\n%-m/%-d").to_string(),
            y_label: String::new(),
        }
    }
}

impl From<PriceSample> for DataPoint {
    fn from(sample: PriceSample) -> Self {
        sample.to_data_point()
    }
}

/// Convert a whole price history, preserving order.
pub fn from_price_history<'a>(
    history: impl IntoIterator<Item = &'a PriceSample>,
) -> Vec<DataPoint> {
    history.into_iter().map(PriceSample::to_data_point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn price_sample_labels_hour_and_date() {
        let at = Utc.with_ymd_and_hms(2024, 10, 7, 15, 30, 0).unwrap();
        let point = PriceSample::new(at, 61_234.5).to_data_point();
        assert_eq!(point.x, 15.0);
        assert_eq!(point.y, 61_234.5);
        assert_eq!(point.x_label, "3PM\n10/7");
        assert!(point.y_label.is_empty());
    }

    #[test]
    fn position_uses_value_equality() {
        let data = vec![
            DataPoint::new(0.0, 1.0, "a", ""),
            DataPoint::new(1.0, 2.0, "b", ""),
            DataPoint::new(1.0, 2.0, "b", ""),
        ];
        let probe = DataPoint::new(1.0, 2.0, "b", "");
        assert_eq!(position_of(&data, &probe), Some(1));
        let missing = DataPoint::new(1.0, 2.0, "c", "");
        assert_eq!(position_of(&data, &missing), None);
    }

    #[test]
    fn history_preserves_order() {
        let samples = [
            PriceSample::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 1.0),
            PriceSample::new(Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(), 2.0),
        ];
        let points = from_price_history(&samples);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x_label, "12AM\n1/1");
        assert_eq!(points[1].y, 2.0);
    }
}
