/// One point along a computed ray path.
///
/// Produced by the travel-time solver; read-only here. Distances are
/// non-decreasing along a valid path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Angular distance from the source (degrees).
    pub dist_deg: f64,

    /// Depth below the surface (km).
    pub depth: f64,

    /// Travel time from the source (seconds).
    pub time: f64,
}

impl PathSample {
    pub const fn new(dist_deg: f64, depth: f64, time: f64) -> Self {
        Self {
            dist_deg,
            depth,
            time,
        }
    }
}

/// One arrival of a seismic phase at a receiver distance, with its
/// full sampled ray path.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    /// Phase name, e.g. "PKIKP".
    pub phase_name: String,

    /// Source depth (km).
    pub source_depth: f64,

    /// Total angular distance from source to receiver (degrees).
    pub dist_deg: f64,

    /// Horizontal slowness (s/rad). Zero for a vertically traveling
    /// ray.
    pub ray_param: f64,

    /// Total travel time (seconds).
    pub time: f64,

    /// Path samples, time ordered.
    pub path: Vec<PathSample>,
}
