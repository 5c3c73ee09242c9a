use crate::io::error::Error;
use serde::Serialize;
use std::io::Write;

/// Writes one value as a JSON document followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    pretty: bool,
) -> Result<(), Error> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes each value as one compact JSON line.
pub fn write_json_lines<W: Write, T: Serialize>(
    mut writer: W,
    values: impl IntoIterator<Item = T>,
) -> Result<(), Error> {
    for value in values {
        serde_json::to_writer(&mut writer, &value)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
