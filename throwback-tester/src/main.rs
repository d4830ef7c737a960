mod logic;
mod play;
mod storage;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use throwback_game::constants::ORIGIN_AXIS;
use throwback_game::{
    GameConfig, GameEngine, GameVariant, RecordDraft, RecordId, TimePoint, options_for, summarize,
};

use logic::{LogicTester, ScenarioResult, expand_scenarios, get_scenario, list_scenarios};
use storage::{FileLedger, FileRecordStore};
use util::{clock_seed, split_csv, split_pair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Memes,
    History,
}

impl From<VariantArg> for GameVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Memes => Self::Memes,
            VariantArg::History => Self::History,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "throwback-tester", version = "0.1.0")]
#[command(about = "Play, curate and stress-test the Throwback timeline trivia engine")]
struct Args {
    /// Game variant (ignored when --config names one)
    #[arg(long, value_enum, default_value_t = VariantArg::Memes, global = true)]
    variant: VariantArg,

    /// JSON record store
    #[arg(long, default_value = "throwback-records.json", global = true)]
    store: PathBuf,

    /// JSON score ledger
    #[arg(long, default_value = "throwback-score.json", global = true)]
    ledger: PathBuf,

    /// JSON game configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for round selection (defaults to the clock)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play rounds interactively over stdin
    Play,
    /// Manage guessable records
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show the answer options offered for a period
    Options {
        #[arg(long, allow_hyphen_values = true)]
        year: i32,
        #[arg(long)]
        month: Option<u8>,
        /// Region key (history only)
        #[arg(long)]
        region: Option<String>,
    },
    /// Run automated logic scenarios against the engine
    Simulate(SimulateArgs),
}

#[derive(Debug, Subcommand)]
enum AdminAction {
    /// Validate and store a new record
    Add {
        #[arg(long)]
        media_ref: String,
        #[arg(long, allow_hyphen_values = true)]
        year: i32,
        #[arg(long)]
        month: Option<u8>,
        /// Answer label (meme name or event title)
        #[arg(long)]
        label: String,
        /// Country code of origin (memes)
        #[arg(long)]
        country: Option<String>,
        /// Ruling power per region as region=power (history, repeatable)
        #[arg(long = "power")]
        powers: Vec<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List stored records, newest first
    List,
    /// Delete a record by id
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct SimulateArgs {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// Variants to simulate (comma-separated)
    #[arg(long, default_value = "memes,history")]
    variants: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match &args.command {
        Command::Play => {
            let engine = build_engine(&args)?;
            let seed = args.seed.unwrap_or_else(clock_seed);
            log::info!("playing with seed {seed}");
            let stdin = std::io::stdin();
            let mut out = stdout();
            play::run_play(&engine, seed, stdin.lock(), &mut out)
        }
        Command::Admin { action } => run_admin(&args, action),
        Command::Options {
            year,
            month,
            region,
        } => {
            let config = load_config(&args)?;
            let time = TimePoint {
                year: *year,
                month: *month,
            };
            for option in options_for(config.variant, time, region.as_deref()) {
                println!("{option}");
            }
            Ok(())
        }
        Command::Simulate(sim) => {
            if run_simulation(sim)? {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_json(&json)
                .with_context(|| format!("invalid configuration in {}", path.display()))
        }
        None => Ok(GameConfig::for_variant(args.variant.into())),
    }
}

fn build_engine(args: &Args) -> Result<GameEngine<FileRecordStore, FileLedger>> {
    Ok(GameEngine::new(
        load_config(args)?,
        FileRecordStore::new(&args.store),
        FileLedger::new(&args.ledger),
    ))
}

fn run_admin(args: &Args, action: &AdminAction) -> Result<()> {
    let engine = build_engine(args)?;
    let variant = engine.config().variant;
    match action {
        AdminAction::Add {
            media_ref,
            year,
            month,
            label,
            country,
            powers,
            description,
        } => {
            let draft = RecordDraft {
                media_ref: media_ref.clone(),
                year: *year,
                month: *month,
                primary_label: label.clone(),
                secondary: secondary_labels(variant, country.as_deref(), powers)?,
                description: description.clone(),
            };
            let id = engine.add_record(&draft)?;
            println!("{} {id}", "✅ Added".green());
        }
        AdminAction::List => {
            let records = engine.list_records()?;
            if records.is_empty() {
                println!("No records yet.");
            }
            for record in records {
                println!(
                    "{}  {}  {}  {}",
                    record.id.as_str().bold(),
                    record.primary_label,
                    summarize(&record, variant).dimmed(),
                    record.watch_url()
                );
                println!("    thumbnail: {}", record.thumbnail_url());
            }
        }
        AdminAction::Delete { id } => {
            engine.delete_record(&RecordId::new(id.as_str()))?;
            println!("{} {id}", "🗑  Deleted".yellow());
        }
    }
    Ok(())
}

fn secondary_labels(
    variant: GameVariant,
    country: Option<&str>,
    powers: &[String],
) -> Result<BTreeMap<String, String>> {
    let mut secondary = BTreeMap::new();
    match variant {
        GameVariant::Memes => {
            if !powers.is_empty() {
                bail!("--power only applies to the history variant");
            }
            if let Some(code) = country {
                secondary.insert(ORIGIN_AXIS.to_string(), code.to_ascii_lowercase());
            }
        }
        GameVariant::History => {
            if country.is_some() {
                bail!("--country only applies to the memes variant");
            }
            for entry in powers {
                let Some((region, power)) = split_pair(entry) else {
                    bail!("expected region=power, got \"{entry}\"");
                };
                secondary.insert(region, power);
            }
        }
    }
    Ok(secondary)
}

fn announce_banner() {
    println!("{}", "🎮 Throwback Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

/// Run the requested scenarios and write the report. Returns whether all passed.
fn run_simulation(sim: &SimulateArgs) -> Result<bool> {
    if maybe_list_scenarios(sim)? {
        return Ok(true);
    }

    announce_banner();
    let start_time = Instant::now();
    let scenarios = expand_scenarios(&split_csv(&sim.scenarios));
    let variants = parse_variants(&sim.variants)?;
    let seeds = parse_seeds(&sim.seeds)?;

    let tester = LogicTester::new(sim.verbose);
    let mut results: Vec<ScenarioResult> = Vec::new();
    for key in &scenarios {
        for &variant in &variants {
            match get_scenario(key, variant) {
                Some(scenario) => {
                    results.extend(tester.run_scenario(&scenario, &seeds, sim.iterations));
                }
                None => eprintln!("⚠️  Unknown scenario: {}", key.yellow()),
            }
        }
    }

    write_reports(sim, &results, start_time)?;
    Ok(results.iter().all(|r| r.passed))
}

fn parse_variants(raw: &str) -> Result<Vec<GameVariant>> {
    split_csv(raw)
        .iter()
        .map(|key| {
            GameVariant::from_key(key).with_context(|| format!("unknown variant \"{key}\""))
        })
        .collect()
}

fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    split_csv(raw)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed \"{token}\""))
        })
        .collect()
}

fn maybe_list_scenarios(sim: &SimulateArgs) -> Result<bool> {
    if !sim.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(sim.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:12} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn write_reports(sim: &SimulateArgs, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(sim.output.clone())?;

    match sim.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Throwback Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
