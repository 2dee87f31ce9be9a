use clap::Parser;

use std::path::Path;

use crate::config::Config;
use crate::error::CliError;
use crate::resource::Resource;
use crate::Mode;

static SUCCESS: &str = "Generated default file on";

#[derive(Parser, Debug)]
pub struct Args {
    /// Only create the file holding this kind of record
    #[arg(value_enum)]
    mode: Option<Mode>,
    /// Create the initial file, overriding existing one
    #[arg(short, long)]
    force: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.create(&config)
}

impl Args {
    fn create(&self, config: &Config) -> anyhow::Result<()> {
        for mode in self.modes() {
            let filepath = config.filepath(mode);

            if Path::new(&filepath).exists() && !self.force {
                return Err(CliError::ExistingFile { filepath }.into());
            }
        }

        for mode in self.modes() {
            let filepath = config.filepath(mode);
            let existed = Path::new(&filepath).exists();

            let resource = Resource::new(config, mode)?;

            if existed {
                resource.create()?;
            }

            crate::wout!("{} {}", SUCCESS, resource.filepath);
        }

        Ok(())
    }

    fn modes(&self) -> Vec<Mode> {
        match self.mode {
            Some(mode) => vec![mode],
            None => vec![Mode::Expenses, Mode::Budgets],
        }
    }
}
