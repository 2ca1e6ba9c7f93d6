//! Per-frame spatial averages of point-cloud frames.

use crate::frame::Frame;
use crate::numeric::round2;
use crate::payload::PointRecord;
use serde::{Serialize, Serializer};

/// Mean position of the qualifying points of one frame.
///
/// An axis is `None` when no point qualified; it is never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAverage {
    #[serde(rename = "time")]
    pub timestamp: String,
    #[serde(rename = "average_x", serialize_with = "rounded")]
    pub avg_x: Option<f64>,
    #[serde(rename = "average_y", serialize_with = "rounded")]
    pub avg_y: Option<f64>,
    #[serde(rename = "average_z", serialize_with = "rounded")]
    pub avg_z: Option<f64>,
}

fn rounded<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    value.map(round2).serialize(serializer)
}

/// Coordinates of a point if all three decoded and lie within `[-limit, limit]`.
///
/// A single out-of-range or undecodable axis disqualifies the whole point.
pub fn qualifying_position(point: &PointRecord, limit: f64) -> Option<[f64; 3]> {
    let [x, y, z] = point.position()?;
    let position = [f64::from(x), f64::from(y), f64::from(z)];
    position
        .iter()
        .all(|v| (-limit..=limit).contains(v))
        .then_some(position)
}

/// Averages one frame. Returns `None` for frames without a point-cloud payload.
pub fn average_frame(frame: &Frame, limit: f64) -> Option<FrameAverage> {
    let points = frame.points()?;

    let mut sum = [0.0f64; 3];
    let mut count = 0usize;
    for position in points.iter().filter_map(|p| qualifying_position(p, limit)) {
        for (acc, v) in sum.iter_mut().zip(position) {
            *acc += v;
        }
        count += 1;
    }

    let mean = |axis: usize| (count > 0).then(|| sum[axis] / count as f64);
    Some(FrameAverage {
        timestamp: frame.timestamp.clone(),
        avg_x: mean(0),
        avg_y: mean(1),
        avg_z: mean(2),
    })
}

/// Averages every point-cloud frame, preserving input order.
pub fn average_frames(frames: &[Frame], limit: f64) -> Vec<FrameAverage> {
    frames
        .iter()
        .filter_map(|frame| average_frame(frame, limit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;
    use crate::frame::decode_line;

    const HEADER: &str =
        "01 02 03 04 05 06 07 08 5F 02 00 00 38 00 00 00 01 00 00 00 3F 02 00 00";
    const AUX: &str = "FA 3B 44 01 41 00 00 7F 43 98 55 0A 41";

    fn point(x: f32, y: f32, z: f32) -> String {
        let hex: Vec<String> = [x, y, z]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .map(|b| format!("{:02X}", b))
            .collect();
        format!("{} {}", hex.join(" "), AUX)
    }

    fn frame(points: &[String]) -> Frame {
        let line = format!("[12:00:00.000]{} {}", HEADER, points.join(" "));
        decode_line(&line, &DecoderConfig::default()).unwrap()
    }

    #[test]
    fn test_out_of_range_point_excluded() {
        let f = frame(&[point(1.0, 2.0, 3.0), point(11.0, 0.0, 0.0)]);
        let avg = average_frame(&f, 10.0).unwrap();
        assert_eq!(avg.timestamp, "12:00:00.000");
        assert_eq!(avg.avg_x, Some(1.0));
        assert_eq!(avg.avg_y, Some(2.0));
        assert_eq!(avg.avg_z, Some(3.0));
    }

    #[test]
    fn test_no_qualifying_points_gives_none() {
        let f = frame(&[point(0.0, -10.5, 0.0), point(0.0, 0.0, 20.0)]);
        let avg = average_frame(&f, 10.0).unwrap();
        assert_eq!((avg.avg_x, avg.avg_y, avg.avg_z), (None, None, None));

        let empty = frame(&[]);
        assert_eq!(average_frame(&empty, 10.0).unwrap().avg_x, None);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let f = frame(&[point(-10.0, 10.0, 0.0), point(10.0, -10.0, 2.0)]);
        let avg = average_frame(&f, 10.0).unwrap();
        assert_eq!(avg.avg_x, Some(0.0));
        assert_eq!(avg.avg_y, Some(0.0));
        assert_eq!(avg.avg_z, Some(1.0));
    }

    #[test]
    fn test_nan_and_raw_points_excluded() {
        let mut bad = point(1.0, 1.0, 1.0);
        bad.replace_range(0..2, "ZZ");
        let f = frame(&[point(f32::NAN, 0.0, 0.0), bad, point(4.0, 4.0, 4.0)]);
        let avg = average_frame(&f, 10.0).unwrap();
        assert_eq!(avg.avg_x, Some(4.0));
    }

    #[test]
    fn test_serialized_shape() {
        let avg = FrameAverage {
            timestamp: "12:00:00.000".to_string(),
            avg_x: Some(0.123_456),
            avg_y: None,
            avg_z: Some(-2.0),
        };
        let json = serde_json::to_string(&avg).unwrap();
        assert_eq!(
            json,
            r#"{"time":"12:00:00.000","average_x":0.12,"average_y":null,"average_z":-2.0}"#
        );
    }

    #[test]
    fn test_average_frames_keeps_order() {
        let frames = vec![frame(&[point(1.0, 1.0, 1.0)]), frame(&[point(3.0, 3.0, 3.0)])];
        let avgs = average_frames(&frames, 10.0);
        assert_eq!(avgs.len(), 2);
        assert_eq!(avgs[0].avg_x, Some(1.0));
        assert_eq!(avgs[1].avg_x, Some(3.0));
    }
}
