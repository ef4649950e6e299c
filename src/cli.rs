// src/cli.rs
use std::{env, path::{Path, PathBuf}};

use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::{Delim, Domain, IdentifierOptions, NormalizeOptions};
use crate::runner::{self, RunSummary};
use crate::{log, specs, store};

const HELP: &str = "\
normalize - rewrite scraped infobox columns into canonical values

USAGE:
    normalize -i <in.csv> [-o <out.csv>] [options]

OPTIONS:
    -i, --in <path>            input table (CSV, or TSV by .tsv extension)
    -o, --out <path>           output table [default: <in>.normalized.<ext>]
        --format <csv|tsv>     override the delimiter for input and output
        --dates <a,b,..>       date columns (replaces the default list)
        --lengths <a,b,..>     length columns
        --weights <a,b,..>     weight columns
        --speeds <a,b,..>      speed columns
        --date-after <Col=re>  only read dates following `re` in Col (repeatable)
        --no-ident             skip hull identifier extraction
        --ident-col <name>     identifier source column [default: Identification]
        --fallback-col <name>  identifier fallback column [default: vessel_url]
        --type-col <name>      output column for the hull type [default: type]
        --number-col <name>    output column for the hull number [default: number]
        --keep-artifacts       do not strip `.mw-parser-output` fragments
        --check-catalogs       validate the built-in catalogs and exit
        --log-file <path>      append logs to a file instead of stderr
    -v, --verbose              debug logging
    -h, --help                 print this help
";

#[derive(Debug)]
pub struct Args {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub opts: NormalizeOptions,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

pub enum Command {
    Normalize(Box<Args>),
    CheckCatalogs,
    Help,
}

pub fn run() -> Result<()> {
    let args = match parse_args(env::args().skip(1))? {
        Command::Help => {
            eprintln!("{HELP}");
            return Ok(());
        }
        Command::CheckCatalogs => {
            println!("{} rules across all catalogs", specs::validate_all());
            return Ok(());
        }
        Command::Normalize(args) => args,
    };

    log::init(args.verbose, args.log_file.as_deref()).wrap_err("could not open log file")?;

    let mut ds = store::load_dataset(&args.input, args.opts.format)
        .wrap_err_with(|| format!("reading {}", args.input.display()))?;
    let summary = runner::normalize(&mut ds, &args.opts, None)?;

    let out = args.output.clone().unwrap_or_else(|| default_out_path(&args.input, args.opts.format));
    store::save_dataset(&out, &ds, args.opts.format)
        .wrap_err_with(|| format!("writing {}", out.display()))?;

    print_summary(&summary, &out);
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Command> {
    let mut args = argv.into_iter();
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut format: Option<Delim> = None;
    let mut opts = NormalizeOptions::default();
    let mut ident = IdentifierOptions::default();
    let mut no_ident = false;
    let mut log_file = None;
    let mut verbose = false;

    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| eyre!("Missing value for {flag}"));
        match a.as_str() {
            "-i" | "--in" => input = Some(PathBuf::from(value(&a)?)),
            "-o" | "--out" => output = Some(PathBuf::from(value(&a)?)),
            "--format" => {
                let v = value(&a)?;
                format = Some(match v.to_ascii_lowercase().as_str() {
                    "csv" => Delim::Csv,
                    "tsv" => Delim::Tsv,
                    other => bail!("Unknown format: {other}"),
                });
            }
            "--dates" => *opts.columns_mut(Domain::Date) = parse_list(&value(&a)?),
            "--lengths" => *opts.columns_mut(Domain::Length) = parse_list(&value(&a)?),
            "--weights" => *opts.columns_mut(Domain::Weight) = parse_list(&value(&a)?),
            "--speeds" => *opts.columns_mut(Domain::Speed) = parse_list(&value(&a)?),
            "--date-after" => {
                let v = value(&a)?;
                let (col, prefix) = v
                    .split_once('=')
                    .filter(|(c, p)| !c.trim().is_empty() && !p.is_empty())
                    .ok_or_else(|| eyre!("Expected Col=prefix for --date-after, got `{v}`"))?;
                opts.date_prefixes.push((s!(col.trim()), s!(prefix)));
            }
            "--no-ident" => no_ident = true,
            "--ident-col" => ident.field_col = value(&a)?,
            "--fallback-col" => ident.fallback_col = value(&a)?,
            "--type-col" => ident.type_col = value(&a)?,
            "--number-col" => ident.number_col = value(&a)?,
            "--keep-artifacts" => opts.strip_artifacts = false,
            "--check-catalogs" => return Ok(Command::CheckCatalogs),
            "--log-file" => log_file = Some(PathBuf::from(value(&a)?)),
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => bail!("Unknown arg: {a}"),
        }
    }

    let input = input.ok_or_else(|| eyre!("Missing input path (-i)"))?;
    opts.format = format.unwrap_or_else(|| Delim::from_path(&input));
    opts.identifiers = (!no_ident).then_some(ident);

    Ok(Command::Normalize(Box::new(Args { input, output, opts, log_file, verbose })))
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// `ships.csv` → `ships.normalized.csv`, next to the input.
fn default_out_path(input: &Path, format: Delim) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    input.with_file_name(format!("{stem}.normalized.{}", format.ext()))
}

fn print_summary(summary: &RunSummary, out: &Path) {
    for r in &summary.columns {
        let applicable = r.rows - r.not_applicable;
        println!("{:<24} {:<7} {:>6}/{:<6}", r.column, r.domain.label(), r.resolved, applicable);
    }
    if let Some(n) = summary.identified {
        println!("{:<24} {:<7} {:>6}", "identifiers", "hull", n);
    }
    if !summary.missing.is_empty() {
        println!("not found: {}", summary.missing.join(", "));
    }
    println!("wrote {}", out.display());
}
