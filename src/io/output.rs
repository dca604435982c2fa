use std::fs::File;
use std::io::{self, BufWriter, Write};

use log::info;
use took::Timer;

use crate::error::SolverError;
use crate::solution::Solution;

/// Serializes the envelope to a named file, or to standard output when no
/// path is given.
pub fn write_solution(solution: &Solution, output_file: Option<&str>) -> Result<(), SolverError> {
    let timer = Timer::new();
    info!(
        "[output] writing solution to {}",
        output_file.unwrap_or("standard output")
    );

    match output_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| SolverError::internal(format!("cannot create {}: {}", path, e)))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, solution)
                .map_err(|e| SolverError::internal(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| SolverError::internal(e.to_string()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer(&mut handle, solution)
                .map_err(|e| SolverError::internal(e.to_string()))?;
            writeln!(handle).map_err(|e| SolverError::internal(e.to_string()))?;
        }
    }

    info!("[output] done, took {}", timer.took());
    Ok(())
}
