//! Command-line installer for the job queue's PostgreSQL functions.
//!
//! Connects through `DB_URL` and installs the requested groups in order,
//! all of them when none are named.
use anyhow::Context;
use clap::Parser;
use queuer_sql::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Groups to install (job, worker, master, notify); all when omitted"
    )]
    group: Vec<String>,
    #[arg(short, long, help = "Execute the scripts even if every function exists")]
    force: bool,
    #[arg(long, help = "Hold a per-group advisory lock while installing")]
    lock: bool,
    #[arg(short, long, help = "Log at debug level")]
    verbose: bool,
}

impl Args {
    fn groups(&self) -> anyhow::Result<Vec<&'static Group>> {
        if self.group.is_empty() {
            return Ok(Group::ALL.to_vec());
        }
        self.group
            .iter()
            .map(|name| {
                Group::find(name.trim())
                    .ok_or_else(|| InstallError::UnknownGroup(name.clone()))
                    .context("invalid --group")
            })
            .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(match args.verbose {
        true => ::log::LevelFilter::Debug,
        false => ::log::LevelFilter::Info,
    })?;
    let groups = args.groups()?;
    let client = db().await?;
    let installer = Installer::new(Facade);
    for group in groups {
        ::log::debug!("{:<32}{:<32}", "installing group", group);
        let installed = match args.lock {
            true => installer.install_locked(&client, group, args.force).await,
            false => installer.install(&client, group, args.force).await,
        };
        installed.with_context(|| format!("installing {} functions", group))?;
    }
    Ok(())
}
