//! GMT plotting-script protocol.
//!
//! Script output brackets the path records with a fixed shell
//! preamble, a basemap command, one circle per model layer, and a
//! trailing `END` heredoc terminator.

use crate::model::EarthModel;
use std::io::{self, Write};

/// Output base name used when none is configured.
pub const DEFAULT_OUT_BASE: &str = "seispath";

/// Resolves an output base name to the `.gmt` file name, appending
/// the extension when missing and falling back to
/// [`DEFAULT_OUT_BASE`] when unset or empty.
pub fn gmt_file_name(base: Option<&str>) -> String {
    let base = match base {
        Some(base) if !base.is_empty() => base,
        _ => DEFAULT_OUT_BASE,
    };
    if base.ends_with(".gmt") {
        base.to_string()
    } else {
        format!("{base}.gmt")
    }
}

/// Companion PostScript name for a `.gmt` script file.
pub fn ps_file_name(gmt_file: &str) -> String {
    match gmt_file.strip_suffix(".gmt") {
        Some(stem) => format!("{stem}.ps"),
        None => format!("{gmt_file}.ps"),
    }
}

/// Writes everything that precedes the path records: shell preamble,
/// basemap, and the layer-circle block. Circle radii are the layer
/// radii scaled to the map width, largest (the surface) first.
pub(crate) fn write_prologue<W: Write>(
    out: &mut W,
    model: &EarthModel,
    map_width: f64,
    ps_file: &str,
) -> io::Result<()> {
    writeln!(out, "#!/bin/sh")?;
    writeln!(out, "#")?;
    writeln!(out, "# Plot ray paths with GMT. To feed the records below to psxy")?;
    writeln!(out, "# from another script instead, delete everything up through the")?;
    writeln!(out, "# last psxy command here, and the final END line.")?;
    writeln!(out, "#")?;
    writeln!(out, "/bin/rm -f {ps_file}")?;
    writeln!(out)?;
    writeln!(out, "# draw surface and label distances.")?;
    writeln!(
        out,
        "psbasemap -K -P -R0/360/0/{} -JP{} -B30p/500N > {ps_file}",
        model.radius, map_width
    )?;
    writeln!(out)?;
    writeln!(out, "# draw circles for layer boundaries, scaled for -JP{map_width}.")?;
    writeln!(out, "psxy -K -O -P -R -JP -Sc -A >> {ps_file} <<ENDLAYERS")?;
    writeln!(out, "0.0 0.0 {map_width}")?;
    for depth in &model.discontinuities {
        writeln!(
            out,
            "0.0 0.0 {}",
            (model.radius - depth) * map_width / model.radius
        )?;
    }
    writeln!(out, "ENDLAYERS")?;
    writeln!(out)?;
    writeln!(out, "# draw paths")?;
    writeln!(out, "psxy -P -R -O -JP -M -A >> {ps_file} <<END")?;
    Ok(())
}

/// Terminates the path-record heredoc. Written exactly once per run.
pub(crate) fn write_epilogue<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "END")
}
