//! Load lease parameter sets from JSON

use super::LeaseParameters;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load and validate a parameter set from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<LeaseParameters, Box<dyn Error>> {
    let file = File::open(path)?;
    load_parameters_from_reader(BufReader::new(file))
}

/// Load and validate a parameter set from any reader
pub fn load_parameters_from_reader<R: std::io::Read>(reader: R) -> Result<LeaseParameters, Box<dyn Error>> {
    let params: LeaseParameters = serde_json::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}
