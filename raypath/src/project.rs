use crate::sphere;
use geo::Point;

/// Geographic anchors for a render run.
///
/// Any field may be absent; which anchors are present decides the
/// projection strategy (see [`Projection::select`]). Azimuths are
/// degrees clockwise from north.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoRefs {
    /// Event (source) location.
    pub event: Option<Point<f64>>,

    /// Bearing from the event toward the station.
    pub azimuth: Option<f64>,

    /// Station (receiver) location.
    pub station: Option<Point<f64>>,

    /// Bearing from the station toward the event.
    pub back_azimuth: Option<f64>,
}

/// Projection strategy resolved once per render run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Forward-project from the event along the supplied or derived
    /// azimuth, at the emitted distance.
    Event { origin: Point<f64>, azimuth: f64 },

    /// Forward-project from the station along the back azimuth, at
    /// the distance still to travel.
    Station {
        origin: Point<f64>,
        back_azimuth: f64,
    },

    /// No usable anchor; records carry no geographic columns.
    None,
}

impl Projection {
    /// Picks the strategy for a run. Strictly ordered: an event with
    /// an azimuth wins, then a station with a back azimuth, then an
    /// event/station pair with the azimuth derived from the two
    /// points. The derived azimuth is computed here, once, and reused
    /// for every sample of the run.
    pub fn select(refs: &GeoRefs) -> Self {
        if let (Some(origin), Some(azimuth)) = (refs.event, refs.azimuth) {
            Self::Event { origin, azimuth }
        } else if let (Some(origin), Some(back_azimuth)) = (refs.station, refs.back_azimuth) {
            Self::Station {
                origin,
                back_azimuth,
            }
        } else if let (Some(event), Some(station)) = (refs.event, refs.station) {
            Self::Event {
                origin: event,
                azimuth: sphere::azimuth(event, station),
            }
        } else {
            Self::None
        }
    }

    /// Location of a path sample emitted at signed distance
    /// `dist_deg` on a path `total_deg` long.
    pub fn project(&self, dist_deg: f64, total_deg: f64) -> Option<Point<f64>> {
        match *self {
            Self::Event { origin, azimuth } => Some(sphere::destination(origin, azimuth, dist_deg)),
            Self::Station {
                origin,
                back_azimuth,
            } => Some(sphere::destination(
                origin,
                back_azimuth,
                total_deg - dist_deg,
            )),
            Self::None => None,
        }
    }
}
