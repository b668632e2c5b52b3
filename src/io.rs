use crate::dataset::Dataset;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Loads a dataset from a JSON file. Parsing happens entirely at this
/// boundary; the engine only ever sees typed records.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes the dataset back as pretty-printed JSON.
pub fn save_dataset(path: &Path, data: &Dataset) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}
