/// Position on the geoscape globe in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPosition {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Great-circle distance to `other`, in degrees of arc (0..=180).
    pub fn distance_degrees(&self, other: &GeoPosition) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let delta_lon = (self.longitude - other.longitude).to_radians();
        let cosine = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lon.cos();
        // rounding can push the cosine slightly outside [-1, 1]
        cosine.clamp(-1.0, 1.0).acos().to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn same_point_is_zero() {
        let p = GeoPosition::new(12.5, -40.0);
        assert!(close(p.distance_degrees(&p), 0.0));
    }

    #[test]
    fn equator_quarter_globe() {
        let a = GeoPosition::new(0.0, 0.0);
        let b = GeoPosition::new(90.0, 0.0);
        assert!(close(a.distance_degrees(&b), 90.0));
    }

    #[test]
    fn antipodes_are_half_globe() {
        let a = GeoPosition::new(0.0, 0.0);
        let b = GeoPosition::new(180.0, 0.0);
        assert!(close(a.distance_degrees(&b), 180.0));
    }
}
