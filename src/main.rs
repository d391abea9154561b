use std::process::ExitCode;
use anyhow::Result;
use clap::Parser;
use mounch::config::Paths;
use mounch::executor;
use mounch::launcher::{self, Outcome};
use mounch::menu::{CommandPicker, MenuBackend};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let _args = Args::parse();

    let paths = Paths::discover();
    let picker = CommandPicker::new(MenuBackend::detect());

    let plan = match launcher::run(&paths, &picker) {
        Ok(Outcome::Cancelled) => return Ok(ExitCode::SUCCESS),
        Ok(Outcome::Launch(plan)) => plan,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    match executor::exec(&plan) {
        Ok(never) => match never {},
        Err(e) => Err(e.into()),
    }
}
