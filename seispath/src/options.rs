use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use geo::geometry::Coord;
use std::{path::PathBuf, str::FromStr};

/// Emit densely sampled seismic ray paths for plotting.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arrival set (JSON) produced by the travel-time solver.
    pub input: PathBuf,

    /// Maximum angular distance between emitted samples, in degrees.
    #[arg(long, default_value_t = raypath::DEFAULT_MAX_PATH_INC)]
    pub max_inc: f64,

    /// Output a complete GMT plotting script instead of plain records.
    #[arg(long, default_value_t = false)]
    pub gmt: bool,

    /// GMT map width.
    #[arg(long, default_value_t = raypath::DEFAULT_MAP_WIDTH)]
    pub map_width: f64,

    /// Output base name; ".gmt" is appended when missing.
    #[arg(short, long)]
    pub out: Option<String>,

    /// Event "lat,lon".
    #[arg(long)]
    pub event: Option<LatLon>,

    /// Azimuth from event to station, in degrees.
    #[arg(long)]
    pub azimuth: Option<f64>,

    /// Station "lat,lon".
    #[arg(long)]
    pub station: Option<LatLon>,

    /// Back azimuth from station to event, in degrees.
    #[arg(long)]
    pub back_azimuth: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
pub struct LatLon(pub Coord<f64>);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let idx = s.find(',').ok_or_else(|| anyhow!("not a valid lat,lon pair"))?;
        let (lat_str, lon_str) = {
            let (lat_str, lon_str) = s.split_at(idx);
            (lat_str, &lon_str[1..])
        };
        let lat = f64::from_str(lat_str)?;
        let lon = f64::from_str(lon_str)?;
        Ok(Self(Coord { y: lat, x: lon }))
    }
}
