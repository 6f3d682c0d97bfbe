//! Build script for linkchase-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .help("Output format (defaults to the configured one)")
        .value_parser(["human", "json", "plain"])
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("linkchase")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Follow symlink chains without getting caught in loops")
        .long_about(
            "Command-line tool for resolving symbolic link chains to their final target \
             and finding broken or looping links",
        )
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
            Arg::new("config")
                .long("config")
                .help("Read settings from this file in addition to the discovered ones")
                .value_name("PATH")
                .global(true)
                .env("LINKCHASE_CONFIG"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Resolve symlinks to their final target")
                .long_about("Follow each path through its symlink chain, stopping on loops")
                .arg(Arg::new("paths").value_name("PATH").num_args(1..).required(true))
                .arg(
                    Arg::new("chain")
                        .long("chain")
                        .help("Show every link followed, not just the final target")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg())
                .arg(
                    Arg::new("must-exist")
                        .long("must-exist")
                        .help("Fail when a chain ends at a path that does not exist")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-tilde")
                        .long("no-tilde")
                        .help("Take a leading ~ literally")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("scan")
                .about("Report symlinks under a directory and whether they resolve")
                .long_about("Walk a directory tree and classify every symlink as resolved, dangling, cyclic or unreadable")
                .arg(Arg::new("dir").value_name("DIR").required(true))
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_name("N")
                        .help("Deepest level to descend to"),
                )
                .arg(
                    Arg::new("hidden")
                        .long("hidden")
                        .help("Include dot-files and dot-directories")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("broken-only")
                        .long("broken-only")
                        .help("List only links that do not resolve")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg()),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a linkchase configuration file for errors")
                .arg(Arg::new("config_path").value_name("CONFIG_PATH").required(true)),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(Arg::new("shell").required(true)),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("linkchase.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
