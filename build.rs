// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("plugin-installer")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Plugin Installer Contributors")
        .about("Install plugins into a package manager's own environment")
        .subcommand_required(true)
        .subcommand(
            Command::new("install")
                .about("Install one or more plugins")
                .arg(
                    Arg::new("plugins")
                        .required(true)
                        .num_args(1..)
                        .help("Plugin identifiers (name, name==1.0, git URL, path)"),
                )
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show the planned operations without applying them"),
                )
                .arg(
                    Arg::new("environment")
                        .short('e')
                        .long("environment")
                        .value_name("PATH")
                        .default_value("environment.json")
                        .help("Manifest of the environment to install into"),
                )
                .arg(
                    Arg::new("index")
                        .short('i')
                        .long("index")
                        .value_name("PATH")
                        .action(ArgAction::Append)
                        .help("Package index file (repeatable)"),
                )
                .arg(
                    Arg::new("host_package")
                        .long("host-package")
                        .value_name("NAME")
                        .default_value("poetry")
                        .help("Name of the host tool's own package"),
                )
                .arg(
                    Arg::new("data_dir")
                        .long("data-dir")
                        .value_name("PATH")
                        .help("Directory holding the lock file"),
                ),
        )
        .subcommand(Command::new("paths").about("Show the plugin home and data directories"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("plugin-installer.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
