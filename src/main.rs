use anyhow::Result;
use clap::Parser;

mod actions;
mod cli;
mod config;
mod details;
mod github_api;
mod model;
mod params;
mod render;
mod status;
mod trigger;
mod util;

use crate::cli::{normalize, Cli};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: load config and pull requests, dispatch the action
  actions::process(&cfg)
}
