use crate::cli::{RepairArgs, RepairDestination};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::BatchProgress;
use molfix::core::io::molfile::MolfileError;
use molfix::workflows::repair::{self, RepairOptions, RepairReport};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

struct Job {
    input: PathBuf,
    output: PathBuf,
}

pub fn run(args: RepairArgs, config: &AppConfig, show_progress: bool) -> Result<()> {
    let options = RepairOptions {
        atom_count: args.atoms,
        strip_final_newline: config.strip_final_newline,
    };

    if let Some(dir) = &args.destination.output_dir {
        fs::create_dir_all(dir)?;
    }
    let jobs = plan_jobs(&args.inputs, &args.destination)?;
    let total = jobs.len();
    info!("Repairing {} file(s).", total);

    let progress = BatchProgress::new(total as u64, show_progress && total > 1);
    let results: Vec<(&Job, std::result::Result<RepairReport, MolfileError>)> = jobs
        .par_iter()
        .map(|job| {
            let result = repair::run_on_path(&job.input, &job.output, &options);
            let message = result.as_ref().err().map(ToString::to_string);
            progress.file_done(&job.input, message.as_deref());
            (job, result)
        })
        .collect();

    let mut failures = Vec::new();
    for (job, result) in results {
        match result {
            Ok(report) => {
                info!(
                    "{:?}: {} atom(s), {} bond(s), {} merged pair(s) split, {} row(s) rewritten",
                    &job.input,
                    report.atom_count,
                    report.bond_count,
                    report.overflow_repairs,
                    report.rewritten_rows
                );
                println!("✓ {} -> {}", job.input.display(), job.output.display());
            }
            Err(e) => {
                error!("Failed to repair {:?}: {}", &job.input, e);
                failures.push((job.input.clone(), e));
            }
        }
    }
    progress.finish(failures.len());

    match failures.len() {
        0 => Ok(()),
        1 if total == 1 => {
            let (path, source) = failures.remove(0);
            Err(CliError::FileParsing {
                path,
                source: source.into(),
            })
        }
        failed => Err(CliError::Batch { failed, total }),
    }
}

fn plan_jobs(inputs: &[PathBuf], destination: &RepairDestination) -> Result<Vec<Job>> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = destination_for(input, destination)?;
        if !seen.insert(output.clone()) {
            return Err(CliError::Argument(format!(
                "More than one input would be written to {}",
                output.display()
            )));
        }
        jobs.push(Job {
            input: input.clone(),
            output,
        });
    }
    Ok(jobs)
}

fn destination_for(input: &Path, destination: &RepairDestination) -> Result<PathBuf> {
    match &destination.output_dir {
        Some(dir) => {
            let file_name = input.file_name().ok_or_else(|| {
                CliError::Argument(format!("Input path has no file name: {}", input.display()))
            })?;
            Ok(dir.join(file_name))
        }
        None => Ok(input.to_path_buf()),
    }
}
