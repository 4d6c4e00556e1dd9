use anyhow::Result;
use clap::Parser;

use provider_ops::cli::{normalize, Cli};
use provider_ops::{dispatch, util};

fn main() -> Result<()> {
  let cli = Cli::parse();
  util::init_logging();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: run the selected task
  dispatch::run(&cfg)
}
