use crate::{
    arrival::Arrival,
    error::RaypathError,
    interp::{SegmentIter, SegmentStep},
    model::EarthModel,
    project::{GeoRefs, Projection},
    script,
};
use log::debug;
use std::io::Write;

/// Maximum angular distance between emitted samples, in degrees.
pub const DEFAULT_MAX_PATH_INC: f64 = 1.0;

/// Map width used for GMT script geometry.
pub const DEFAULT_MAP_WIDTH: f64 = 6.0;

/// Renders arrivals as discretized path records.
///
/// Walks each arrival's raw samples in order, subdivides wide
/// segments with [`SegmentIter`], projects emitted distances to
/// latitude/longitude when anchors are configured, and writes one
/// text record per sample. In GMT script mode the records are
/// bracketed by the plotting-script protocol and geographic columns
/// are suppressed.
#[derive(Debug, Clone)]
pub struct PathRenderer {
    max_path_inc: f64,
    map_width: f64,
    gmt_script: bool,
    model: EarthModel,
    projection: Projection,
    out_file: String,
    ps_file: String,
}

impl PathRenderer {
    pub fn builder() -> PathRendererBuilder {
        PathRendererBuilder {
            max_path_inc: DEFAULT_MAX_PATH_INC,
            map_width: DEFAULT_MAP_WIDTH,
            gmt_script: false,
            out_base: None,
            model: EarthModel::default(),
            refs: GeoRefs::default(),
        }
    }

    /// Name of the output file this renderer is configured for.
    pub fn out_file(&self) -> &str {
        &self.out_file
    }

    /// Writes one complete run. In script mode the protocol prologue
    /// precedes the records, and the `END` terminator is written even
    /// when rendering faults part way through.
    pub fn write_run<W: Write>(&self, out: &mut W, arrivals: &[Arrival]) -> Result<(), RaypathError> {
        if self.gmt_script {
            script::write_prologue(out, &self.model, self.map_width, &self.ps_file)?;
        }
        let rendered = self.write_paths(out, arrivals);
        if self.gmt_script {
            let terminated = script::write_epilogue(out).map_err(RaypathError::from);
            rendered.and(terminated)
        } else {
            rendered
        }
    }

    fn write_paths<W: Write>(&self, out: &mut W, arrivals: &[Arrival]) -> Result<(), RaypathError> {
        for arrival in arrivals {
            self.write_arrival(out, arrival)?;
        }
        Ok(())
    }

    fn write_arrival<W: Write>(&self, out: &mut W, arrival: &Arrival) -> Result<(), RaypathError> {
        writeln!(
            out,
            "> {} at {:.2} seconds at {:.2} degrees for a {:.1} km deep source in the {} model with rayParam {:.3} s/deg.",
            arrival.phase_name,
            arrival.time,
            arrival.dist_deg,
            arrival.source_depth,
            self.model.name,
            arrival.ray_param * std::f64::consts::PI / 180.0,
        )?;

        let long_way_round = arrival.dist_deg % 360.0 > 180.0;
        let mut prev_dist_deg = 0.0;
        let mut emitted = 0_usize;

        for (j, sample) in arrival.path.iter().enumerate() {
            if sample.dist_deg < prev_dist_deg {
                return Err(RaypathError::Backtrack {
                    index: j,
                    dist_deg: sample.dist_deg,
                    prev_deg: prev_dist_deg,
                });
            }
            prev_dist_deg = sample.dist_deg;

            let dist_deg = if long_way_round && sample.dist_deg != 0.0 {
                -sample.dist_deg
            } else {
                sample.dist_deg
            };
            self.write_record(out, dist_deg, sample.depth, arrival.dist_deg)?;
            emitted += 1;

            if let Some(next) = arrival.path.get(j + 1) {
                if arrival.ray_param != 0.0 && next.dist_deg - sample.dist_deg > self.max_path_inc {
                    let segment = SegmentIter::new(
                        SegmentStep::from(*sample),
                        SegmentStep::from(*next),
                        self.max_path_inc,
                        long_way_round,
                    );
                    for step in segment {
                        self.write_record(out, step.dist_deg, step.depth, arrival.dist_deg)?;
                        emitted += 1;
                    }
                }
            }
        }

        debug!(
            "phase {}: {} raw samples, {} records",
            arrival.phase_name,
            arrival.path.len(),
            emitted
        );
        Ok(())
    }

    fn write_record<W: Write>(
        &self,
        out: &mut W,
        dist_deg: f64,
        depth: f64,
        total_deg: f64,
    ) -> Result<(), RaypathError> {
        write!(out, "{:8.2}  {:7.1}", dist_deg, self.model.radius - depth)?;
        if !self.gmt_script {
            if let Some(point) = self.projection.project(dist_deg, total_deg) {
                write!(out, "  {:8.2}  {:8.2}", point.y(), point.x())?;
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Configures and validates a [`PathRenderer`].
pub struct PathRendererBuilder {
    max_path_inc: f64,
    map_width: f64,
    gmt_script: bool,
    out_base: Option<String>,
    model: EarthModel,
    refs: GeoRefs,
}

impl PathRendererBuilder {
    /// Maximum angular distance between emitted samples, in degrees
    /// (defaults to [`DEFAULT_MAX_PATH_INC`]). Must be positive.
    #[must_use]
    pub fn max_path_inc(mut self, degrees: f64) -> Self {
        self.max_path_inc = degrees;
        self
    }

    /// GMT map width (defaults to [`DEFAULT_MAP_WIDTH`]).
    #[must_use]
    pub fn map_width(mut self, map_width: f64) -> Self {
        self.map_width = map_width;
        self
    }

    /// Emit a complete GMT script instead of plain records (defaults
    /// to off).
    #[must_use]
    pub fn gmt_script(mut self, gmt_script: bool) -> Self {
        self.gmt_script = gmt_script;
        self
    }

    /// Output base name; `.gmt` is appended when missing (defaults to
    /// [`DEFAULT_OUT_BASE`](crate::DEFAULT_OUT_BASE)).
    #[must_use]
    pub fn out_base<S: Into<String>>(mut self, base: S) -> Self {
        self.out_base = Some(base.into());
        self
    }

    /// Earth model for record radii and script layer circles
    /// (defaults to iasp91).
    #[must_use]
    pub fn model(mut self, model: EarthModel) -> Self {
        self.model = model;
        self
    }

    /// Geographic anchors for latitude/longitude columns (default:
    /// none).
    #[must_use]
    pub fn geo_refs(mut self, refs: GeoRefs) -> Self {
        self.refs = refs;
        self
    }

    pub fn build(self) -> Result<PathRenderer, RaypathError> {
        if !(self.max_path_inc > 0.0) {
            return Err(RaypathError::MaxPathInc(self.max_path_inc));
        }
        let out_file = script::gmt_file_name(self.out_base.as_deref());
        let ps_file = script::ps_file_name(&out_file);
        Ok(PathRenderer {
            max_path_inc: self.max_path_inc,
            map_width: self.map_width,
            gmt_script: self.gmt_script,
            model: self.model,
            projection: Projection::select(&self.refs),
            out_file,
            ps_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PathRenderer;
    use crate::{
        arrival::{Arrival, PathSample},
        error::RaypathError,
        project::GeoRefs,
        sphere,
    };
    use approx::assert_relative_eq;
    use geo::point;

    fn arrival(dist_deg: f64, ray_param: f64, samples: &[(f64, f64, f64)]) -> Arrival {
        Arrival {
            phase_name: "P".to_string(),
            source_depth: samples.first().map_or(0.0, |s| s.1),
            dist_deg,
            ray_param,
            time: samples.last().map_or(0.0, |s| s.2),
            path: samples
                .iter()
                .map(|&(dist_deg, depth, time)| PathSample::new(dist_deg, depth, time))
                .collect(),
        }
    }

    fn render(renderer: &PathRenderer, arrivals: &[Arrival]) -> String {
        let mut buf = Vec::new();
        renderer.write_run(&mut buf, arrivals).unwrap();
        String::from_utf8(buf).unwrap()
    }

    /// Numeric columns of every non-comment line.
    fn records(output: &str) -> Vec<Vec<f64>> {
        output
            .lines()
            .filter(|line| !line.starts_with('>') && !line.is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|field| field.parse().unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_interpolates_wide_segments() {
        let renderer = PathRenderer::builder().max_path_inc(3.0).build().unwrap();
        let arr = arrival(10.0, 500.0, &[(0.0, 0.0, 0.0), (10.0, 50.0, 100.0)]);
        let recs = records(&render(&renderer, &[arr]));

        let dists: Vec<f64> = recs.iter().map(|rec| rec[0]).collect();
        assert_eq!(dists, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        let radii: Vec<f64> = recs.iter().map(|rec| rec[1]).collect();
        assert_eq!(radii, vec![6371.0, 6358.5, 6346.0, 6333.5, 6321.0]);
    }

    #[test]
    fn test_zero_ray_param_disables_interpolation() {
        let renderer = PathRenderer::builder().max_path_inc(1.0).build().unwrap();
        let arr = arrival(10.0, 0.0, &[(0.0, 0.0, 0.0), (10.0, 50.0, 100.0)]);
        let recs = records(&render(&renderer, &[arr]));
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn test_backtracking_faults() {
        let renderer = PathRenderer::builder().build().unwrap();
        let arr = arrival(
            10.0,
            500.0,
            &[(0.0, 0.0, 0.0), (6.0, 30.0, 60.0), (5.0, 40.0, 80.0)],
        );
        let mut buf = Vec::new();
        let err = renderer.write_run(&mut buf, &[arr]).unwrap_err();
        match err {
            RaypathError::Backtrack { index, .. } => assert_eq!(index, 2),
            other => panic!("expected backtrack fault, got {other:?}"),
        }
    }

    #[test]
    fn test_long_way_round_negates_all_but_leading_zero() {
        let renderer = PathRenderer::builder().max_path_inc(50.0).build().unwrap();
        let arr = arrival(
            200.0,
            500.0,
            &[(0.0, 0.0, 0.0), (100.0, 600.0, 700.0), (200.0, 0.0, 1400.0)],
        );
        let recs = records(&render(&renderer, &[arr]));
        assert_eq!(recs[0][0], 0.0);
        assert!(recs[1..].iter().all(|rec| rec[0] < 0.0));
    }

    #[test]
    fn test_short_way_distances_stay_positive() {
        let renderer = PathRenderer::builder().max_path_inc(50.0).build().unwrap();
        let arr = arrival(
            170.0,
            500.0,
            &[(0.0, 0.0, 0.0), (85.0, 600.0, 700.0), (170.0, 0.0, 1400.0)],
        );
        let recs = records(&render(&renderer, &[arr]));
        assert!(recs.iter().all(|rec| rec[0] >= 0.0));
    }

    #[test]
    fn test_emitted_steps_bounded_by_max_path_inc() {
        let renderer = PathRenderer::builder().max_path_inc(1.0).build().unwrap();
        let arr = arrival(
            20.0,
            500.0,
            &[
                (0.0, 0.0, 0.0),
                (0.4, 10.0, 5.0),
                (5.3, 60.0, 50.0),
                (7.0, 80.0, 70.0),
                (7.05, 81.0, 71.0),
                (20.0, 200.0, 200.0),
            ],
        );
        let recs = records(&render(&renderer, &[arr]));
        let dists: Vec<f64> = recs.iter().map(|rec| rec[0]).collect();
        for pair in dists.windows(2) {
            assert!(
                pair[1] - pair[0] <= 1.0 + 1e-9,
                "step {} -> {} wider than max increment",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_event_anchor_appends_lat_lon_columns() {
        let refs = GeoRefs {
            event: Some(point!(x: 0.0, y: 0.0)),
            azimuth: Some(90.0),
            ..GeoRefs::default()
        };
        let renderer = PathRenderer::builder()
            .max_path_inc(10.0)
            .geo_refs(refs)
            .build()
            .unwrap();
        let arr = arrival(30.0, 500.0, &[(0.0, 0.0, 0.0), (30.0, 100.0, 600.0)]);
        let recs = records(&render(&renderer, &[arr]));

        for rec in &recs {
            assert_eq!(rec.len(), 4);
            let expected = sphere::destination(point!(x: 0.0, y: 0.0), 90.0, rec[0]);
            assert_relative_eq!(rec[2], expected.y(), epsilon = 5e-3);
            assert_relative_eq!(rec[3], expected.x(), epsilon = 5e-3);
        }
    }

    #[test]
    fn test_station_anchor_projects_remaining_distance() {
        let refs = GeoRefs {
            station: Some(point!(x: 30.0, y: 0.0)),
            back_azimuth: Some(270.0),
            ..GeoRefs::default()
        };
        let renderer = PathRenderer::builder()
            .max_path_inc(10.0)
            .geo_refs(refs)
            .build()
            .unwrap();
        let arr = arrival(30.0, 500.0, &[(0.0, 0.0, 0.0), (30.0, 100.0, 600.0)]);
        let recs = records(&render(&renderer, &[arr]));

        // Longitude tracks the emitted distance: the station anchor
        // walks back 30 - d degrees along the equator.
        for rec in &recs {
            assert_eq!(rec.len(), 4);
            assert_relative_eq!(rec[2], 0.0, epsilon = 5e-3);
            assert_relative_eq!(rec[3], rec[0], epsilon = 5e-3);
        }
    }

    #[test]
    fn test_comment_line_identifies_arrival() {
        let renderer = PathRenderer::builder().build().unwrap();
        let arr = arrival(10.0, 500.0, &[(0.0, 0.0, 0.0), (10.0, 50.0, 100.0)]);
        let output = render(&renderer, &[arr]);
        let header = output.lines().next().unwrap();
        assert!(header.starts_with("> P at "));
        assert!(header.contains("in the iasp91 model"));
    }

    #[test]
    fn test_gmt_script_protocol_shape() {
        let refs = GeoRefs {
            event: Some(point!(x: 0.0, y: 0.0)),
            azimuth: Some(90.0),
            ..GeoRefs::default()
        };
        let renderer = PathRenderer::builder()
            .max_path_inc(3.0)
            .gmt_script(true)
            .geo_refs(refs)
            .build()
            .unwrap();
        let arr = arrival(10.0, 500.0, &[(0.0, 0.0, 0.0), (10.0, 50.0, 100.0)]);
        let output = render(&renderer, &[arr]);

        assert!(output.starts_with("#!/bin/sh\n"));
        let circles = output
            .lines()
            .filter(|line| line.starts_with("0.0 0.0 "))
            .count();
        // Whole earth plus the seven iasp91 discontinuities.
        assert_eq!(circles, 8);
        assert_eq!(output.lines().filter(|line| *line == "ENDLAYERS").count(), 1);
        assert_eq!(output.lines().filter(|line| *line == "END").count(), 1);
        assert_eq!(output.lines().last(), Some("END"));

        // Script mode never emits geographic columns, even with
        // anchors configured.
        let body: Vec<&str> = output
            .lines()
            .skip_while(|line| !line.ends_with("<<END"))
            .skip(1)
            .take_while(|line| *line != "END")
            .collect();
        assert_eq!(body.len(), 6);
        assert!(body[0].starts_with("> P at "));
        for record in &body[1..] {
            assert_eq!(record.split_whitespace().count(), 2);
        }
    }

    #[test]
    fn test_gmt_terminator_written_after_fault() {
        let renderer = PathRenderer::builder().gmt_script(true).build().unwrap();
        let arr = arrival(10.0, 500.0, &[(5.0, 0.0, 0.0), (4.0, 10.0, 10.0)]);
        let mut buf = Vec::new();
        assert!(renderer.write_run(&mut buf, &[arr]).is_err());
        let output = String::from_utf8(buf).unwrap();
        assert!(output.ends_with("\nEND\n"));
    }

    #[test]
    fn test_builder_rejects_non_positive_increment() {
        for bad in [0.0, -1.0, f64::NAN] {
            let result = PathRenderer::builder().max_path_inc(bad).build();
            assert!(matches!(result, Err(RaypathError::MaxPathInc(_))));
        }
    }

    #[test]
    fn test_out_file_resolution() {
        let renderer = PathRenderer::builder().build().unwrap();
        assert_eq!(renderer.out_file(), "seispath.gmt");
        let renderer = PathRenderer::builder().out_base("run7").build().unwrap();
        assert_eq!(renderer.out_file(), "run7.gmt");
    }
}
