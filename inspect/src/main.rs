//! Print the contents of a Standard Midi File as tables of decoded events.

use clap::Parser;
use log::debug;
use smfinspect::{ControllerTable, ManufacturerTable, MidiFile, Names, TableError};
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
    process,
};

const DEFAULT_CONTROLLERS: &str = include_str!("../../tables/controllers.tsv");
const DEFAULT_MANUFACTURERS: &str = include_str!("../../tables/manufacturers.tsv");

#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// The MIDI file to inspect.
    mid_path: PathBuf,
    /// Tab-separated controller names, replacing the built-in table.
    #[arg(long)]
    controllers: Option<PathBuf>,
    /// Tab-separated sysex manufacturer IDs, replacing the built-in table.
    #[arg(long)]
    manufacturers: Option<PathBuf>,
    /// Only print the track with this index.
    #[arg(short, long)]
    track: Option<usize>,
    /// Also dump the sysex messages found in the file.
    #[arg(short, long)]
    sysex: bool,
}

fn load_table<T>(
    path: Option<&Path>,
    builtin: &str,
    parse: fn(&str) -> Result<T, TableError>,
) -> Result<T, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            parse(&text).map_err(|err| format!("{}: {}", path.display(), err).into())
        }
        None => Ok(parse(builtin)?),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let names = Names {
        controllers: load_table(
            args.controllers.as_deref(),
            DEFAULT_CONTROLLERS,
            ControllerTable::from_tsv,
        )?,
        manufacturers: load_table(
            args.manufacturers.as_deref(),
            DEFAULT_MANUFACTURERS,
            ManufacturerTable::from_tsv,
        )?,
    };
    let data = fs::read(&args.mid_path)?;
    debug!("read {} bytes from \"{}\"", data.len(), args.mid_path.display());
    let smf = MidiFile::parse(&data, &names)?;

    println!("{}", smf.header);
    if let Some((declared, found)) = smf.track_count_mismatch() {
        println!("(header declares {} tracks, found {})", declared, found);
    }
    if let Some(only) = args.track {
        if only >= smf.tracks.len() {
            return Err(format!(
                "no track {}, the file has {} tracks",
                only,
                smf.tracks.len()
            )
            .into());
        }
    }
    for (i, track) in smf.tracks.iter().enumerate() {
        if args.track.map_or(false, |only| only != i) {
            continue;
        }
        println!();
        println!("== track {} ==", i);
        println!("deltatime\tstatus\tchannel\tdata");
        for ev in track {
            println!("{}", ev.row());
        }
    }

    if args.sysex {
        let messages = smf.sysex.messages();
        println!();
        println!("== {} sysex messages ==", messages.len());
        for (i, msg) in messages.iter().enumerate() {
            println!("#{} length={}: {}", i, msg.len(), hex(msg));
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
