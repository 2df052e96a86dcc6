use std::error::Error;
use std::io::Read;

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::{error, info};
use streamnbt::file::decompress;
use streamnbt::{Buffer, Compression, Endianness, NbtFile, NbtReader, Value};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn read_input(args: &ArgMatches) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match args.value_of("file") {
        Some("-") | None => {
            std::io::stdin().read_to_end(&mut bytes)?;
        }
        Some(path) => bytes = std::fs::read(path)?,
    }
    Ok(bytes)
}

fn compression(args: &ArgMatches) -> Compression {
    match args.value_of("compression") {
        Some("none") => Compression::None,
        Some("gzip") => Compression::GZip,
        Some("zlib") => Compression::ZLib,
        _ => Compression::AutoDetect,
    }
}

fn endianness(args: &ArgMatches) -> Endianness {
    match args.is_present("little-endian") {
        true => Endianness::Little,
        false => Endianness::Big,
    }
}

/// Print every tag on its own line, indented by depth, without building a
/// tree.
fn dump(bytes: Vec<u8>, endian: Endianness) -> Result<()> {
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::with_endianness(&mut buf, endian);

    while reader.advance_to_next()? {
        let indent = reader.depth().saturating_sub(1) * 4;
        if !reader.has_value() {
            println!("{:indent$}{}", "", reader, indent = indent);
            continue;
        }

        match reader.read_value()? {
            // Arrays can be huge, the length is already in the header line.
            Value::ByteArray(_) | Value::IntArray(_) | Value::LongArray(_) => {
                println!("{:indent$}{}", "", reader, indent = indent)
            }
            Value::String(s) => println!("{:indent$}{} = {:?}", "", reader, s, indent = indent),
            value => println!(
                "{:indent$}{} = {}",
                "",
                reader,
                serde_json::to_string(&value)?,
                indent = indent
            ),
        }
    }

    info!("{} tags read", reader.tags_read());
    Ok(())
}

/// Materialize the first tag called `name` and print it as JSON.
fn find(bytes: Vec<u8>, endian: Endianness, name: &str) -> Result<()> {
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::with_endianness(&mut buf, endian);

    if !reader.advance_to_named(name)? {
        error!("no tag called {:?}", name);
        return Ok(());
    }
    let tag = reader.materialize_as_tag()?;
    println!("{}", serde_json::to_string_pretty(tag.value())?);
    Ok(())
}

fn json(bytes: Vec<u8>, endian: Endianness) -> Result<()> {
    let mut file = NbtFile::new();
    file.set_endianness(endian);
    file.load_from_bytes(&bytes, Compression::None)?;
    println!("{}", serde_json::to_string_pretty(file.root())?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-dump")
        .about("Print the contents of an NBT file")
        .arg(
            Arg::with_name("file")
                .takes_value(true)
                .required(false)
                .help("file to read, or - for stdin"),
        )
        .arg(
            Arg::with_name("compression")
                .long("compression")
                .takes_value(true)
                .possible_values(&["auto", "none", "gzip", "zlib"])
                .default_value("auto"),
        )
        .arg(Arg::with_name("little-endian").long("little-endian"))
        .arg(
            Arg::with_name("json")
                .long("json")
                .conflicts_with("find")
                .help("load the whole tree and print it as JSON"),
        )
        .arg(
            Arg::with_name("find")
                .long("find")
                .takes_value(true)
                .help("print only the first tag with this name, as JSON"),
        )
        .get_matches();

    let (bytes, found) = decompress(&read_input(&matches)?, compression(&matches))?;
    info!("read {} bytes ({:?})", bytes.len(), found);

    let endian = endianness(&matches);
    match (matches.is_present("json"), matches.value_of("find")) {
        (true, _) => json(bytes, endian),
        (false, Some(name)) => find(bytes, endian, name),
        (false, None) => dump(bytes, endian),
    }
}
