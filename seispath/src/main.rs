mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use geo::Point;
use log::info;
use options::{Cli, LatLon};
use raypath::{Arrival, EarthModel, GeoRefs, PathRenderer, PathSample};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
};

fn main() -> Result<(), AnyError> {
    env_logger::init();

    let Cli {
        input,
        max_inc,
        gmt,
        map_width,
        out,
        event,
        azimuth,
        station,
        back_azimuth,
    } = Cli::parse();

    let run: RunInput = serde_json::from_reader(BufReader::new(File::open(&input)?))?;

    let refs = GeoRefs {
        event: event.map(|LatLon(coord)| Point::from(coord)),
        azimuth,
        station: station.map(|LatLon(coord)| Point::from(coord)),
        back_azimuth,
    };

    let mut builder = PathRenderer::builder()
        .max_path_inc(max_inc)
        .map_width(map_width)
        .gmt_script(gmt)
        .geo_refs(refs);
    if let Some(model) = run.model {
        builder = builder.model(model.into());
    }
    if let Some(out) = out {
        builder = builder.out_base(out);
    }
    let renderer = builder.build()?;

    let arrivals: Vec<Arrival> = run.arrivals.into_iter().map(Arrival::from).collect();

    let mut writer = BufWriter::new(File::create(renderer.out_file())?);
    let rendered = renderer.write_run(&mut writer, &arrivals);
    let flushed = writer.flush();
    rendered?;
    flushed?;

    info!("wrote {} arrivals to {}", arrivals.len(), renderer.out_file());
    Ok(())
}

/// Solver output as read from disk.
#[derive(Debug, Deserialize)]
struct RunInput {
    #[serde(default)]
    model: Option<ModelInput>,
    arrivals: Vec<ArrivalInput>,
}

#[derive(Debug, Deserialize)]
struct ModelInput {
    name: String,
    radius: f64,
    #[serde(default)]
    discontinuities: Vec<f64>,
}

impl From<ModelInput> for EarthModel {
    fn from(
        ModelInput {
            name,
            radius,
            discontinuities,
        }: ModelInput,
    ) -> Self {
        Self {
            name,
            radius,
            discontinuities,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArrivalInput {
    phase: String,
    source_depth: f64,
    dist_deg: f64,
    ray_param: f64,
    time: f64,
    /// Raw samples as (distance deg, depth km, time s) triples.
    path: Vec<(f64, f64, f64)>,
}

impl From<ArrivalInput> for Arrival {
    fn from(input: ArrivalInput) -> Self {
        Self {
            phase_name: input.phase,
            source_depth: input.source_depth,
            dist_deg: input.dist_deg,
            ray_param: input.ray_param,
            time: input.time,
            path: input
                .path
                .into_iter()
                .map(|(dist_deg, depth, time)| PathSample::new(dist_deg, depth, time))
                .collect(),
        }
    }
}
