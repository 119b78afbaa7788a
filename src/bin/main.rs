//! This is the main entry point for the FAT32 navigator.
//!
//! The program provides an interactive command-line interface for browsing FAT32 disk images.
//! Usage: `main [-v...] [-q] [image]`. The optional image is opened on start.

use fat_navigator::commands::Command;
use fat_navigator::traits::LayoutDisplay;
use fat_navigator::{FATError, Session};
use log::error;
use std::io::{self, Write};

fn main() {
    let mut verbosity = 1;
    let mut quiet = false;
    let mut image = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-q" => quiet = true,
            flag if flag.starts_with("-v") && flag[1..].chars().all(|c| c == 'v') => {
                verbosity += flag.len() - 1
            }
            path => image = Some(path.to_string()),
        }
    }

    stderrlog::new()
        .module(module_path!())
        .module("fat_navigator")
        .quiet(quiet)
        .verbosity(verbosity)
        .init()
        .unwrap();

    let mut session = Session::new();
    if let Some(path) = image {
        report(session.open(&path));
    }

    loop {
        print!("mfs> ");
        io::stdout().flush().unwrap();

        let mut s = String::new();
        match io::stdin().read_line(&mut s) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("Failed to read command: {err}");
                break;
            }
        }

        match Command::from_string(&s) {
            Command::Quit => break,
            Command::Open(path) => report(session.open(&path)),
            Command::Close => report(session.close()),
            Command::Info => print_info(&session),
            Command::Ls => match session.ls() {
                Ok(names) => names.iter().for_each(|name| println!("{name}")),
                Err(err) => report_err(err),
            },
            Command::Stat(name) => match session.stat(&name) {
                Ok(stat) => {
                    println!("Attribute: \t 0x{:x}", stat.attr());
                    println!("Cluster number:\t {}", stat.cluster());
                    println!("Size: \t\t {}", stat.size());
                }
                Err(err) => report_err(err),
            },
            Command::Cd(path) => report(session.cd(&path)),
            Command::Get(name) => match session.get(&name) {
                Ok(written) => println!("Wrote {written} bytes to {name}"),
                Err(err) => report_err(err),
            },
            Command::Read {
                name,
                position,
                count,
            } => match session.read(&name, position, count) {
                Ok(bytes) => {
                    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:x}")).collect();
                    println!("{}", hex.join(" "));
                }
                Err(err) => report_err(err),
            },
            Command::Unknown(s) => error!("Unknown command: {s:?}"),
            Command::Invalid(s) => error!("{s}"),
            Command::Empty => {}
        }
    }

    if session.is_open() {
        report(session.close());
    }
}

fn print_info(session: &Session) {
    let image = match session.image() {
        Ok(image) => image,
        Err(err) => return report_err(err),
    };

    print!("{}", image.bpb());
    match image.display_layout(0) {
        Ok(layout) => print!("{layout}"),
        Err(err) => error!("Print layout error: {err}"),
    }
}

fn report(result: Result<(), FATError>) {
    if let Err(err) = result {
        report_err(err);
    }
}

fn report_err(err: FATError) {
    error!("Error: {err}");
}
