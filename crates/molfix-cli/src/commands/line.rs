use crate::cli::LineArgs;
use crate::error::Result;
use molfix::core::io::molfile::render_connectivity_line;

pub fn run(args: LineArgs) -> Result<()> {
    println!("{}", render_connectivity_line(&args.line)?);
    Ok(())
}
