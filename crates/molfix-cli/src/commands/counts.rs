use crate::cli::CountsArgs;
use crate::error::Result;
use molfix::core::io::molfile::rewrite_counts_line;
use tracing::debug;

pub fn run(args: CountsArgs) -> Result<()> {
    let line = rewrite_counts_line(&args.line, args.atoms, args.bonds);
    debug!("Counts line rewritten to {:?}", line);
    println!("{}", line);
    Ok(())
}
