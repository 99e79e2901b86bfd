// Command-line interface for adf
//
// Converts ADF JSON documents into the formats registered in adf-babel, and offers an
// inspect command for looking at the parsed tree and the engine's visit order.
//
// Usage:
//  adf <input.json> --to <format> [--output <file>]       - Convert (default command)
//  adf convert <input.json> [--to <format>] [-o <file>]   - Same as above (explicit)
//  adf inspect <input.json> [<transform>]                 - Execute a transform (defaults to "doc-treeviz")
//  adf --list-formats                                     - List formats and transforms
//
// The target format may be left out when --output has an extension a format claims.
// An input of "-" reads the document from stdin.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  adf doc.json --to markdown --extra-bullet-marker - --extra-indent-width 4

use adf_cli::transforms;

use adf_babel::formats::{
    HtmlFormat, MarkdownFormat, MarkdownOptions, TextFormat, TraceFormat, TreevizFormat,
};
use adf_babel::{parse_document, FormatRegistry};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
///
/// A lone `-` counts as a value so `--extra-bullet-marker -` works.
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| next == "-" || !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting ADF documents")
        .long_about(
            "adf converts Atlassian Document Format style JSON into other formats.\n\n\
            Commands:\n  \
            - convert: Render a document as markdown, html, text, treeviz or trace\n  \
            - inspect: View the parsed tree and the traversal order\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            adf doc.json --to markdown                  # Markdown to stdout\n  \
            adf doc.json -o page.html --extra-standalone # Full HTML page\n  \
            adf inspect doc.json                        # Tree visualization\n  \
            cat doc.json | adf - --to text              # Read from stdin",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter used when RUST_LOG is not set (error, warn, info, debug, trace)")
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the document tree")
                .long_about(
                    "View the parsed document.\n\n\
                    Transforms:\n  \
                    - doc-treeviz:  Tree visualization (default)\n  \
                    - doc-json:     Parsed tree as JSON\n  \
                    - doc-trace:    Visit order with sibling index and list context\n\n\
                    Extra Parameters:\n  \
                    --extra-show-attrs    Append node attributes to tree labels",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the ADF JSON file, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'doc-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to another format (default command)")
                .long_about(
                    "Convert an ADF document.\n\n\
                    Supported formats:\n  \
                    - markdown: CommonMark-flavored Markdown (.md)\n  \
                    - html:     HTML fragment or standalone page (.html)\n  \
                    - text:     Plain text (.txt)\n  \
                    - treeviz:  Tree visualization (.tree)\n  \
                    - trace:    Traversal log (.trace)\n\n\
                    The target format is taken from --to, or detected from the --output\n\
                    extension. Output goes to stdout by default.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (detected from --output if omitted)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading path means the convert subcommand was left out
            if cleaned_args.len() > 1
                && (cleaned_args[1] == "-" || !cleaned_args[1].starts_with('-'))
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let level = matches
        .get_one::<String>("log-level")
        .map(|s| s.as_str())
        .unwrap_or(config.logging.level.as_str());
    init_logging(level);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = required_arg(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let registry = registry_from_config(&config);

            let to = match sub_matches.get_one::<String>("to") {
                Some(to) => to.to_string(),
                None => match output.and_then(|path| registry.detect_format_from_filename(path)) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: No target format given");
                        eprintln!("Please specify --to, or an --output file with a known extension");
                        std::process::exit(1);
                    }
                },
            };

            handle_convert_command(&registry, input, &to, output, &extra_params);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument <{name}>");
            std::process::exit(2);
        }
    }
}

/// Read a file, or stdin for `-`.
fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(path)
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let source = read_input(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let treeviz = (&config.inspect.treeviz).into();
    let output = transforms::execute_transform(&source, transform, treeviz, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = parse_document(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Format-specific parameters allowed via --extra-*
    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &AdfConfig) {
    let registry = registry_from_config(config);

    println!("Conversion formats:");
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let extensions = format.file_extensions().join(", ");
            println!("  {format_name:<10} {} [{extensions}]", format.description());
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Stock formats, with configured defaults for the ones that take options.
fn registry_from_config(config: &AdfConfig) -> FormatRegistry {
    let markdown = MarkdownOptions::try_from(&config.convert.markdown).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    });

    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat::new(markdown));
    registry.register(HtmlFormat::new((&config.convert.html).into()));
    registry.register(TextFormat::default());
    registry.register(TreevizFormat::new((&config.inspect.treeviz).into()));
    registry.register(TraceFormat);
    registry
}
