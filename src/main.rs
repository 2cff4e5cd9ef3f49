// vardump: dump files as structured, colorized values

use std::fs;
use std::path::PathBuf;
use std::process;

use vardump::{AnsiColorizer, Config, Dump, Dumper, Node, Record, Visibility};

/// A file read from disk, shown as a record
struct FileDump {
    path: PathBuf,
    contents: Contents,
}

enum Contents {
    Bytes(Vec<u8>),
    Text(String),
}

impl Dump for FileDump {
    fn node(&self) -> Node<'_> {
        let record = Record::new().field("path", Visibility::Public, &self.path);
        let record = match &self.contents {
            Contents::Bytes(bytes) => record
                .field_owned("len", Visibility::Public, bytes.len())
                .field("contents", Visibility::Public, bytes),
            Contents::Text(text) => record
                .field_owned("len", Visibility::Public, text.len())
                .field("contents", Visibility::Public, text),
        };
        Node::Struct(record)
    }
}

struct Options {
    html: bool,
    no_color: bool,
    text: bool,
    config: Config,
    files: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        html: false,
        no_color: false,
        text: false,
        config: Config::from_env(),
        files: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--html" => options.html = true,
            "--no-color" => options.no_color = true,
            "--text" => options.text = true,
            "--max-depth" => options.config.max_depth = limit_value(arg, iter.next())?,
            "--max-items" => options.config.max_items = limit_value(arg, iter.next())?,
            "--max-string-len" => {
                options.config.max_string_len = limit_value(arg, iter.next())?
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            file => options.files.push(file.to_string()),
        }
    }

    if options.files.is_empty() {
        return Err("No input file provided".to_string());
    }
    Ok(options)
}

fn limit_value(flag: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} expects a value", flag))?;
    value
        .parse::<usize>()
        .map_err(|_| format!("{} expects a non-negative integer, got '{}'", flag, value))
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} [--html] [--no-color] [--text] [--max-depth N] [--max-items N] \
         [--max-string-len N] <file>...",
        program_name
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} Cargo.toml --text           # Show a file as a string",
        program_name
    );
    eprintln!(
        "  {} image.png --max-items 4     # Hex dump of a binary file",
        program_name
    );
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("vardump");

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(program_name);
            process::exit(1);
        }
    };

    let mut dumps = Vec::with_capacity(options.files.len());
    for file in &options.files {
        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: Failed to read '{}': {}", file, e);
                process::exit(1);
            }
        };
        let contents = if options.text {
            Contents::Text(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            Contents::Bytes(bytes)
        };
        dumps.push(FileDump {
            path: PathBuf::from(file),
            contents,
        });
    }

    let mut builder = Dumper::builder().config(options.config).header(false);
    if options.no_color {
        builder = builder.colorizer(AnsiColorizer::with_enabled(false));
    }
    let dumper = builder.build();

    let values: Vec<&dyn Dump> = dumps.iter().map(|d| d as &dyn Dump).collect();
    if options.html {
        println!("{}", dumper.dump_to_html(&values));
    } else {
        dumper.dump(&values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_and_files() {
        let options = parse_args(&args(&["--html", "--max-items", "4", "a.bin", "b.txt"])).unwrap();
        assert!(options.html);
        assert_eq!(options.config.max_items, 4);
        assert_eq!(options.files, vec!["a.bin", "b.txt"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--max-depth"])).is_err());
        assert!(parse_args(&args(&["--max-depth", "-1", "a"])).is_err());
        assert!(parse_args(&args(&["--verbose", "a"])).is_err());
    }
}
