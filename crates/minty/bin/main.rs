#[macro_use]
extern crate tracing;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use minty::Session;
use minty_cli::{handler, utils};

pub mod args;
pub mod cmd;

use args::{Minty as MintyArgs, MintySubcommand};
use cmd::load_config;

fn main() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();
    utils::enable_paint();
    let args = MintyArgs::parse();
    main_args(args)
}

#[tokio::main]
async fn main_args(args: MintyArgs) -> Result<()> {
    let session = || load_config(args.config.as_deref()).map(Session::new);
    match args.cmd {
        MintySubcommand::Mint(cmd) => cmd.run(&session()?).await?,
        MintySubcommand::Show(cmd) => cmd.run(&session()?).await?,
        MintySubcommand::Transfer(cmd) => cmd.run(&session()?).await?,
        MintySubcommand::Pin(cmd) => cmd.run(&session()?).await?,
        MintySubcommand::Deploy(cmd) => cmd.run(&load_config(args.config.as_deref())?).await?,
        MintySubcommand::Completions { shell } => {
            generate(shell, &mut MintyArgs::command(), "minty", &mut std::io::stdout())
        }
    };
    Ok(())
}
