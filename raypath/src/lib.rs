//! # Seismic ray path discretization
//!
//! `raypath` turns the sparse ray path samples produced by a
//! travel-time solver into densely sampled plotting records: angular
//! steps bounded by a configurable increment, great-circle projection
//! of path distance to latitude/longitude, and optional GMT script
//! output.

mod arrival;
mod error;
mod interp;
mod model;
mod project;
mod render;
mod script;
pub mod sphere;

pub use {
    crate::{
        arrival::{Arrival, PathSample},
        error::RaypathError,
        interp::{SegmentIter, SegmentStep},
        model::EarthModel,
        project::{GeoRefs, Projection},
        render::{PathRenderer, PathRendererBuilder, DEFAULT_MAP_WIDTH, DEFAULT_MAX_PATH_INC},
        script::{gmt_file_name, ps_file_name, DEFAULT_OUT_BASE},
    },
    geo,
};
