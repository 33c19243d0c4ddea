use std::io::{self, Write};

use lumen_grid::LightField;

/// Writes the light field one z plane at a time: a row per y, `{:3} ` per x.
pub fn write_chunk<W: Write>(out: &mut W, dest: &LightField) -> io::Result<()> {
    let n = dest.dims().side();
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                write!(out, "{:3} ", dest.get(x, y, z))?;
            }
            writeln!(out)?;
        }
        write!(out, "\n\n")?;
    }
    Ok(())
}
