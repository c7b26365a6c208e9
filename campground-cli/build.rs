//! Build script for campground-cli.
//!
//! Generates the `campground.1` man page into `OUT_DIR` with clap_mangen.
//! The command tree is rebuilt here because a build script cannot depend on
//! the crate it builds; keep it in step with src/cli.rs.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;

fn build_cli() -> Command {
    Command::new("campground")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage campsites, capacity and reservations")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("CAMPGROUND_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("CAMPGROUND_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Do not create the data directory or database when missing")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_name("FORMAT")
                .value_parser(["table", "json"])
                .global(true),
        )
        .subcommands([
            Command::new("facility")
                .about("Manage facilities")
                .subcommands([Command::new("add"), Command::new("list")]),
            Command::new("catalog")
                .about("Manage attribute and equipment catalogs")
                .subcommands([
                    Command::new("add-attribute"),
                    Command::new("add-equipment"),
                    Command::new("list"),
                ]),
            Command::new("campsite")
                .about("Manage campsites, capacity and availability")
                .subcommands([
                    Command::new("add"),
                    Command::new("show"),
                    Command::new("list"),
                    Command::new("enable"),
                    Command::new("disable"),
                    Command::new("delete"),
                    Command::new("capacity"),
                    Command::new("availability"),
                ]),
            Command::new("reservation")
                .about("Manage reservations")
                .subcommands([
                    Command::new("add"),
                    Command::new("list"),
                    Command::new("show"),
                    Command::new("cancel"),
                ]),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("campground.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
