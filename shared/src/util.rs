/// Screen-space unit vector for a heading in degrees.
/// Heading 0 points up (negative y) and grows clockwise.
#[inline(always)]
pub fn heading_to_unit(heading_degrees: f32) -> (f32, f32) {
    let (sin, cos) = heading_degrees.to_radians().sin_cos();
    (sin, -cos)
}

/// Heading in degrees of a screen-space direction. Inverse of `heading_to_unit`.
#[inline(always)]
pub fn heading_of(x: f32, y: f32) -> f32 {
    normalize_degrees(x.atan2(-y).to_degrees())
}

/// Wraps an angle in degrees into [0, 360).
#[inline(always)]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two headings, in [0, 180].
pub fn heading_difference(a: f32, b: f32) -> f32 {
    let diff = normalize_degrees(a - b);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_zero_points_up() {
        let (x, y) = heading_to_unit(0.0);
        assert!(x.abs() < 1e-6, "x should be 0 for heading 0, got {}", x);
        assert!((y + 1.0).abs() < 1e-6, "y should be -1 for heading 0, got {}", y);
    }

    #[test]
    fn test_heading_grows_clockwise() {
        let (x, y) = heading_to_unit(90.0);
        assert!((x - 1.0).abs() < 1e-6, "heading 90 should point right, got x={}", x);
        assert!(y.abs() < 1e-6, "heading 90 should have no vertical part, got y={}", y);

        let (x, y) = heading_to_unit(180.0);
        assert!(x.abs() < 1e-5, "heading 180 should have no horizontal part, got x={}", x);
        assert!((y - 1.0).abs() < 1e-6, "heading 180 should point down, got y={}", y);
    }

    #[test]
    fn test_heading_round_trip_through_vector() {
        for &heading in &[0.0, 12.5, 90.0, 179.0, 181.0, 270.0, 359.0] {
            let (x, y) = heading_to_unit(heading);
            let back = heading_of(x, y);
            assert!(
                heading_difference(back, heading) < 1e-3,
                "heading {} came back as {}",
                heading,
                back
            );
        }
    }

    #[test]
    fn test_normalize_negative_and_large_angles() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(720.0 + 45.0) - 45.0).abs() < 1e-3);
        assert!(normalize_degrees(360.0).abs() < 1e-6);
        let tiny = normalize_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny), "got {}", tiny);
    }

    #[test]
    fn test_heading_difference_wraps() {
        assert!((heading_difference(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((heading_difference(10.0, 190.0) - 180.0).abs() < 1e-4);
        assert!(heading_difference(45.0, 45.0 + 360.0).abs() < 1e-3);
    }
}
