use super::{DEFAULT_LOGFILE, DEFAULT_PNGFILE, VERSION};
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// Input logfile, output image and verbosity of a plotting run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            input: PathBuf::from(DEFAULT_LOGFILE),
            output: PathBuf::from(DEFAULT_PNGFILE),
            verbose: false,
        }
    }
}

/// Takes the CLI arguments that control the plotting of the latency series.
pub fn parse_cli() -> PlotConfig {
    parse_cli_from(std::env::args_os())
}

pub fn parse_cli_from<I, T>(args: I) -> PlotConfig
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_logfile = Arg::with_name("input_logfile")
        .help("name of the scanner logfile")
        .short("f")
        .long("logfile")
        .takes_value(true)
        .default_value(DEFAULT_LOGFILE);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file, overwritten if it exists")
        .short("o")
        .long("pngfile")
        .takes_value(true)
        .default_value(DEFAULT_PNGFILE);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information, RUST_LOG takes precedence")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("latency_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the timestamp - latency series of the first SSID")
        .arg(arg_logfile)
        .arg(arg_pngout)
        .arg(arg_verbose)
        .get_matches_from(args);
    PlotConfig {
        input: PathBuf::from(cli_args.value_of("input_logfile").unwrap_or(DEFAULT_LOGFILE)),
        output: PathBuf::from(cli_args.value_of("output_pngfile").unwrap_or(DEFAULT_PNGFILE)),
        verbose: cli_args.is_present("verbose"),
    }
}
