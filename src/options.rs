//! Parsing Options.
//! `pn2fast [OPTIONS] <INPUT>...`, every input is a PNML file.

use clap::{Arg, ArgAction, Command};
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Fast,
    Json,
    Ron,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Fast => "fst",
            OutputFormat::Json => "json",
            OutputFormat::Ron => "ron",
        }
    }
}

fn make_options_parser() -> clap::Command {
    Command::new("pn2fast")
        .no_binary_name(true)
        .version("v0.1.0")
        .about("Translate PNML Place/Transition nets into FAST models")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("PNML files to translate")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the translation to FILE instead of stdout"),
        )
        .arg(
            Arg::new("out-dir")
                .short('d')
                .long("out-dir")
                .value_name("DIR")
                .help("Write <stem>.<ext> for every input into DIR"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML strategy configuration")
                .default_value("fast.toml"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .default_value("fast")
                .value_parser(["fast", "json", "ron"]),
        )
        .arg(
            Arg::new("init-region")
                .long("init-region")
                .value_name("EXPR")
                .help("Initial region replacing the initial marking"),
        )
        .arg(
            Arg::new("silent")
                .long("silent")
                .help("Translate only the silent (tau) transitions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diagnose")
                .long("diagnose")
                .help("Log a connectivity report for every net")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug, Default)]
pub struct Options {
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub out_dir: Option<String>,
    pub config: String,
    pub format: OutputFormat,
    pub init_region: Option<String>,
    pub silent: bool,
    pub diagnose: bool,
    pub verbose: bool,
}

impl Options {
    pub fn parse_from_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let flags = shellwords::split(s)?;
        Self::parse_from_args(&flags)
    }

    pub fn parse_from_args(flags: &[String]) -> Result<Self, Box<dyn Error>> {
        let app = make_options_parser();
        let matches = app.try_get_matches_from(flags.iter())?;

        let inputs: Vec<String> = matches
            .get_many::<String>("input")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("fast") | None => OutputFormat::Fast,
            Some("json") => OutputFormat::Json,
            Some("ron") => OutputFormat::Ron,
            _ => return Err("UnsupportedOutputFormat")?,
        };

        let output = matches.get_one::<String>("output").cloned();
        let out_dir = matches.get_one::<String>("out-dir").cloned();
        if output.is_some() && out_dir.is_some() {
            return Err("--output and --out-dir are mutually exclusive")?;
        }
        if output.is_some() && inputs.len() > 1 {
            return Err("--output requires a single input")?;
        }

        Ok(Options {
            inputs,
            output,
            out_dir,
            config: matches
                .get_one::<String>("config")
                .cloned()
                .unwrap_or_default(),
            format,
            init_region: matches.get_one::<String>("init-region").cloned(),
            silent: matches.get_flag("silent"),
            diagnose: matches.get_flag("diagnose"),
            verbose: matches.get_flag("verbose"),
        })
    }
}
