use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Error, Result, Tour};

/// Writes one `x,y` line per route stop, closing stop included.
pub fn write_route(tour: &Tour, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create route output file {}: {e}",
                    path.display()
                ))
            })?;
            write_route_to(tour, BufWriter::new(file))
        }
        None => write_route_to(tour, io::stdout().lock()),
    }
}

pub fn write_route_to<W: Write>(tour: &Tour, mut writer: W) -> Result<()> {
    for point in tour.route_points() {
        writeln!(writer, "{point}")?;
    }
    writer.flush()?;
    Ok(())
}
