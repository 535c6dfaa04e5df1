//! CLI definitions and command routing.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Config, HostessPaths};
use crate::profile::ProfileStore;
use crate::region::RegionStore;
use crate::store::{self, BackupSlot};

#[derive(Parser)]
#[command(name = "hostess")]
#[command(about = "Toggle a managed block of hosts file entries and keep named profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// One-time setup: creates ~/.hostess, backs up the hosts file, creates profiles.json
    Init,
    /// List managed entries with their index and state
    List,
    /// Add targets as active entries
    Add {
        #[arg(required = true, num_args = 1..)]
        targets: Vec<String>,
    },
    /// Remove every entry matching the target
    Remove { target: String },
    /// Route the entry at INDEX to the loopback address
    Enable { index: usize },
    /// Comment out the entry at INDEX
    Disable { index: usize },
    /// Manage saved profiles (list, save, load)
    Profile {
        #[command(subcommand)]
        cmd: ProfileCmd,
    },
    /// Restore an earlier hosts file
    Revert {
        #[arg(value_enum)]
        to: RevertTarget,
    },
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    /// List saved profile names
    List,
    /// Save the current managed entries under NAME (overwrites)
    Save { name: String },
    /// Replace the managed entries with profile NAME and write the hosts file
    Load { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RevertTarget {
    /// Hosts file as it was when this session started
    Session,
    /// Hosts file from before hostess was first run
    Original,
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = HostessPaths::default_paths();
    let config = Config::load(&paths)?;

    match cli.command {
        Commands::Init => cmd_init(&paths, &config),
        Commands::List => cmd_list(&config),
        Commands::Add { targets } => {
            let mut hosts = RegionStore::load(&config.hosts_file)?;
            for t in &targets {
                hosts.add_entry(t.as_str())?;
            }
            commit(&mut hosts, &paths, &config)?;
            for t in &targets {
                println!("Added: {t}");
            }
            Ok(())
        }
        Commands::Remove { target } => {
            let mut hosts = RegionStore::load(&config.hosts_file)?;
            let removed = hosts.remove_entry(&target);
            if removed == 0 {
                anyhow::bail!("no managed entry for '{target}'");
            }
            commit(&mut hosts, &paths, &config)?;
            println!("Removed: {target} ({removed} entries)");
            Ok(())
        }
        Commands::Enable { index } => cmd_set_active(&paths, &config, index, true),
        Commands::Disable { index } => cmd_set_active(&paths, &config, index, false),
        Commands::Profile { cmd } => cmd_profile(&paths, &config, cmd),
        Commands::Revert { to } => {
            let mut hosts = RegionStore::load(&config.hosts_file)?;
            match to {
                RevertTarget::Session => hosts.revert_session()?,
                RevertTarget::Original => hosts.revert_original()?,
            }
            Ok(())
        }
    }
}

fn cmd_init(paths: &HostessPaths, config: &Config) -> Result<()> {
    match store::initialize(paths, config)? {
        BackupSlot::Original => println!(
            "Backed up {} to {}",
            config.hosts_file.display(),
            paths.backup_original.display()
        ),
        BackupSlot::Recent => println!(
            "Original backup kept; latest copy at {}",
            paths.backup_recent.display()
        ),
    }
    println!("Hostess initialised at {}", paths.config_dir.display());
    Ok(())
}

fn cmd_list(config: &Config) -> Result<()> {
    let hosts = RegionStore::load(&config.hosts_file)?;
    for (i, e) in hosts.entries().iter().enumerate() {
        let state = if e.active { "active" } else { "disabled" };
        println!("{i}\t{state}\t{}", e.target);
    }
    Ok(())
}

fn cmd_set_active(paths: &HostessPaths, config: &Config, index: usize, active: bool) -> Result<()> {
    let mut hosts = RegionStore::load(&config.hosts_file)?;
    hosts.set_active(index, active)?;
    let target = hosts.entries()[index].target.clone();
    if hosts.is_dirty() {
        commit(&mut hosts, paths, config)?;
    }
    let verb = if active { "Enabled" } else { "Disabled" };
    println!("{verb}: {target}");
    Ok(())
}

fn cmd_profile(paths: &HostessPaths, config: &Config, cmd: ProfileCmd) -> Result<()> {
    let profiles = ProfileStore::new(&paths.profiles_file);
    match cmd {
        ProfileCmd::List => {
            for name in profiles.list_profiles()? {
                println!("{name}");
            }
            Ok(())
        }
        ProfileCmd::Save { name } => {
            let hosts = RegionStore::load(&config.hosts_file)?;
            profiles.save_profile(&name, hosts.entries())?;
            println!("Saved profile: {name} ({} entries)", hosts.entries().len());
            Ok(())
        }
        ProfileCmd::Load { name } => {
            let entries = profiles.load_profile(&name)?;
            let mut hosts = RegionStore::load(&config.hosts_file)?;
            hosts.replace_entries(entries);
            if hosts.is_dirty() {
                commit(&mut hosts, paths, config)?;
            }
            println!("Loaded profile: {name}");
            Ok(())
        }
    }
}

/// Write the hosts file, backing up the untouched original first if this is the first change.
fn commit(hosts: &mut RegionStore, paths: &HostessPaths, config: &Config) -> Result<()> {
    store::ensure_original_backup(paths, hosts.path())?;
    let replacer = crate::platform::default_replacer(config);
    hosts.commit(replacer.as_ref())?;
    Ok(())
}
