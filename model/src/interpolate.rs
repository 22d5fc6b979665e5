use crate::error::{Error, Result};
use crate::{GeoPoint, Position};

/// Where a track is at `time_ms`, linearly interpolating between the two points that bracket it.
/// Times before the first point or after the last clamp to that point.
pub fn interpolate(points: &[GeoPoint], time_ms: i64) -> Result<Position> {
    if points.is_empty() {
        return Err(Error::InvalidArgument(
            "can't interpolate an empty track".to_string(),
        ));
    }
    // Several points may share the first time; the earliest wins
    if time_ms <= points[0].time_offset_ms {
        return Ok(points[0].position());
    }

    let idx = bracketing_idx(points, time_ms);
    let pt1 = &points[idx];
    let pt2 = match points.get(idx + 1) {
        Some(pt) => pt,
        None => {
            return Ok(pt1.position());
        }
    };

    // Widened, so offsets near the ends of i64 can't overflow
    let dt = i128::from(pt2.time_offset_ms) - i128::from(pt1.time_offset_ms);
    if dt == 0 {
        return Ok(pt1.position());
    }
    let progress = (i128::from(time_ms) - i128::from(pt1.time_offset_ms)) as f64 / dt as f64;
    Ok(Position {
        latitude: lerp(pt1.latitude, pt2.latitude, progress),
        longitude: lerp(pt1.longitude, pt2.longitude, progress),
        elevation_meters: lerp(pt1.elevation_meters, pt2.elevation_meters, progress),
    })
}

/// The index of the point at or before `time_ms` whose successor (if any) is strictly after it.
/// Assumes `points` is non-empty, sorted by time, and `time_ms` isn't before the first point.
fn bracketing_idx(points: &[GeoPoint], time_ms: i64) -> usize {
    // Number of points at or before time_ms. At least 1, given the caller's check.
    let count = points.partition_point(|pt| pt.time_offset_ms <= time_ms);
    count.max(1) - 1
}

fn lerp(a: f64, b: f64, progress: f64) -> f64 {
    a + (b - a) * progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64, ele: f64, t: i64) -> GeoPoint {
        GeoPoint::new(lat, lon, ele, t)
    }

    fn sample() -> Vec<GeoPoint> {
        vec![
            pt(40.0, -74.0, 10.0, 0),
            pt(40.01, -74.0, 20.0, 1000),
            pt(40.01, -73.99, 15.0, 3000),
        ]
    }

    #[test]
    fn empty_fails() {
        assert!(matches!(
            interpolate(&[], 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn halfway() {
        let pos = interpolate(&sample(), 500).unwrap();
        assert!((pos.latitude - 40.005).abs() < 1e-9);
        assert_eq!(pos.longitude, -74.0);
        assert!((pos.elevation_meters - 15.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_to_ends() {
        let points = sample();
        assert_eq!(interpolate(&points, -50).unwrap(), points[0].position());
        assert_eq!(interpolate(&points, 0).unwrap(), points[0].position());
        assert_eq!(interpolate(&points, 3000).unwrap(), points[2].position());
        assert_eq!(interpolate(&points, 999_999).unwrap(), points[2].position());
    }

    #[test]
    fn exact_at_points_and_strictly_between_just_before() {
        let points = sample();
        for pair in points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            assert_eq!(
                interpolate(&points, p1.time_offset_ms).unwrap(),
                p1.position()
            );

            let pos = interpolate(&points, p2.time_offset_ms - 1).unwrap();
            for (value, a, b) in [
                (pos.latitude, p1.latitude, p2.latitude),
                (pos.longitude, p1.longitude, p2.longitude),
                (pos.elevation_meters, p1.elevation_meters, p2.elevation_meters),
            ] {
                if a == b {
                    assert_eq!(value, a);
                } else {
                    assert!(value > a.min(b) && value < a.max(b));
                }
            }
        }
    }

    #[test]
    fn repeated_calls_match() {
        let points = sample();
        assert_eq!(
            interpolate(&points, 1234).unwrap(),
            interpolate(&points, 1234).unwrap()
        );
    }

    #[test]
    fn duplicate_timestamps() {
        let points = vec![
            pt(1.0, 1.0, 0.0, 0),
            pt(2.0, 2.0, 0.0, 0),
            pt(3.0, 3.0, 0.0, 1000),
            pt(4.0, 4.0, 0.0, 1000),
            pt(5.0, 5.0, 0.0, 2000),
        ];
        // The earliest of the points sharing the starting time
        assert_eq!(interpolate(&points, 0).unwrap(), points[0].position());
        // Between the second starting point and the next distinct time
        let pos = interpolate(&points, 500).unwrap();
        assert!((pos.latitude - 2.5).abs() < 1e-9);
        // At a tie in the middle, the segment that continues forward is used
        assert_eq!(interpolate(&points, 1000).unwrap(), points[3].position());
        let pos = interpolate(&points, 1500).unwrap();
        assert!((pos.latitude - 4.5).abs() < 1e-9);
    }

    #[test]
    fn extreme_offsets() {
        let points = vec![pt(0.0, 0.0, 0.0, i64::MIN + 1), pt(2.0, 0.0, 0.0, i64::MAX)];
        let pos = interpolate(&points, 0).unwrap();
        assert!((pos.latitude - 1.0).abs() < 1e-9);
        assert_eq!(interpolate(&points, i64::MAX).unwrap(), points[1].position());
    }

    #[test]
    fn single_point() {
        let points = vec![pt(1.0, 2.0, 3.0, 0)];
        for t in [-1, 0, 1, 10_000] {
            assert_eq!(interpolate(&points, t).unwrap(), points[0].position());
        }
    }

    #[test]
    fn nan_passes_through() {
        let points = vec![pt(f64::NAN, 0.0, 0.0, 0), pt(1.0, 0.0, 0.0, 100)];
        assert!(interpolate(&points, 50).unwrap().latitude.is_nan());
    }
}
