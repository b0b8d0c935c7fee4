use crate::cli::{BondsArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use molfix::core::io::{
    molfile::{MolConnectivity, MolfileError, read_counts_header},
    table,
    traits::ConnectivityFile,
};
use molfix::core::models::connectivity::ConnectivityBlock;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn run(args: BondsArgs, config: &AppConfig) -> Result<()> {
    let block = load_block(&args.input, args.atoms).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    info!(
        "Decoded {} bond row(s) from {:?}",
        block.len(),
        &args.input
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.output_format {
        OutputFormat::Table => table::write_text_table(&block, &mut out)?,
        OutputFormat::Csv => table::write_csv(&block, &mut out).map_err(MolfileError::from)?,
    }
    out.flush()?;
    Ok(())
}

fn load_block(path: &Path, atoms: Option<usize>) -> std::result::Result<ConnectivityBlock, MolfileError> {
    let source = std::fs::read_to_string(path)?;
    let n_atoms = match atoms {
        Some(n) => n,
        None => read_counts_header(&source)?.atom_count,
    };
    MolConnectivity::read_from(&mut source.as_bytes(), n_atoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SOURCE: &str = "\
water
  molfix

  3  2  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 O   0  0
    0.9600    0.0000    0.0000 H   0  0
   -0.2400    0.9300    0.0000 H   0  0
  1  2  1  0  0  0  0
  1  3  1  0  0  0  0
M  END
";

    #[test]
    fn atom_count_defaults_to_declared_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.mol");
        fs::write(&path, SOURCE).unwrap();

        let block = load_block(&path, None).unwrap();
        assert_eq!(block.len(), 2);
        assert_eq!(block[1].atom_index_2, 3);
    }

    #[test]
    fn explicit_atom_count_moves_the_block_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.mol");
        fs::write(&path, SOURCE).unwrap();

        let block = load_block(&path, Some(4)).unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block[0].atom_index_2, 3);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let args = BondsArgs {
            input: dir.path().join("absent.mol"),
            atoms: None,
            format: None,
        };
        let config = AppConfig {
            output_format: OutputFormat::Table,
            strip_final_newline: false,
            threads: None,
        };
        let err = run(args, &config).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
        assert!(err.to_string().contains("absent.mol"));
    }
}
