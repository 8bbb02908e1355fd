use clap::{Parser, Subcommand, ValueEnum};
use hand_odds::card::{CardType, DeckSize};
use hand_odds::engine::MAX_MULLIGANS;
use hand_odds::report::{BorderlineOrder, Report};
use hand_odds::scenario::Scenario;
use hand_odds::sweep::{best_point, run_sweep, SweepOutcome};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(name = "hand-odds")]
#[command(about = "Exact opening hand probability calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Scenario inputs, from a JSON file or from flags
#[derive(clap::Args)]
struct ScenarioArgs {
    /// Scenario JSON file; overrides the deck and draw flags below
    #[arg(long = "scenario")]
    file: Option<String>,

    /// Deck size preset
    #[arg(long, value_enum, default_value = "60")]
    deck_size: DeckSize,

    /// Untracked cards in the deck, only for a custom deck size
    #[arg(long)]
    other: Option<u32>,

    /// Tracked card type as NAME:COUNT[:REQUIRED], repeatable
    #[arg(short, long = "card")]
    cards: Vec<CardType>,

    /// Opening hand size
    #[arg(long, default_value = "7")]
    hand_size: u32,

    /// Number of allowed mulligans
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_MULLIGANS)))]
    mulligans: u32,

    /// Extra draws for borderline hands
    #[arg(short, long, default_value = "3")]
    extra_draws: u32,
}

impl ScenarioArgs {
    fn load(&self) -> Scenario {
        let scenario = match &self.file {
            Some(path) => match Scenario::from_file(path) {
                Ok(scenario) => {
                    eprintln!("✓ Loaded scenario from {}", path);
                    scenario
                }
                Err(e) => {
                    eprintln!("✗ Failed to load scenario '{}': {}", path, e);
                    std::process::exit(1);
                }
            },
            None => Scenario {
                deck_size: self.deck_size,
                other_cards: self.other,
                cards: self.cards.clone(),
                hand_size: self.hand_size,
                mulligans: self.mulligans,
                extra_draws: self.extra_draws,
            },
        };

        if let Err(e) = scenario.validate() {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
        scenario
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate success, borderline and mulligan probabilities
    Calc {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Borderline table row order
        #[arg(short, long, value_enum, default_value = "enumeration")]
        sort: BorderlineOrder,
    },

    /// Vary one tracked card type's count and compare the odds
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Tracked card type to vary
        #[arg(long)]
        vary: String,

        /// Smallest count to try
        #[arg(long, default_value = "0")]
        from: u32,

        /// Largest count to try
        #[arg(long)]
        to: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List the deck size presets
    Presets,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            scenario,
            format,
            sort,
        } => calculate(&scenario.load(), format, sort),
        Commands::Sweep {
            scenario,
            vary,
            from,
            to,
            format,
        } => sweep(&scenario.load(), &vary, from, to, format),
        Commands::Presets => list_presets(),
    }
}

fn calculate(scenario: &Scenario, format: OutputFormat, sort: BorderlineOrder) {
    let request = match scenario.request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("✗ Cannot calculate: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "calculating {} card types, {} cards, hand of {}",
        request.deck.type_count(),
        request.deck.total(),
        request.hand_size
    );

    let start = std::time::Instant::now();
    let calculation = match request.run() {
        Ok(calculation) => calculation,
        Err(e) => {
            eprintln!("✗ Cannot calculate: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();
    log::info!("calculation completed in {:.2?}", elapsed);

    let report = Report::new(&request, calculation, sort);
    match format {
        OutputFormat::Table => print!("{}", report),
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("✗ Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn sweep(scenario: &Scenario, card: &str, from: u32, to: u32, format: OutputFormat) {
    if from > to {
        eprintln!("✗ --from ({}) must not exceed --to ({})", from, to);
        std::process::exit(1);
    }

    let progress = ProgressBar::new(u64::from(to) - u64::from(from) + 1);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} counts [{elapsed}]") {
        progress.set_style(style);
    }

    let points = match run_sweep(scenario, card, from..=to, progress) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("✗ Sweep failed: {}", e);
            std::process::exit(1);
        }
    };

    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(&points) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("✗ Failed to serialize sweep: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("\n=== {} Count Sweep ({}) ===\n", card, scenario.deck_size);
    println!(
        "{:>6} {:>12} {:>16} {:>18}",
        "Count", "Success (%)", "Borderline (%)", "With mulls (%)"
    );
    println!("{:-<55}", "");
    for point in &points {
        match &point.outcome {
            SweepOutcome::Computed {
                single_hand_success,
                borderline_mass,
                with_mulligans,
            } => {
                let bar = "█".repeat((single_hand_success * 20.0) as usize);
                println!(
                    "{:>6} {:>12.2} {:>16.2} {:>18.2} {}",
                    point.count,
                    single_hand_success * 100.0,
                    borderline_mass * 100.0,
                    with_mulligans * 100.0,
                    bar
                );
            }
            SweepOutcome::Skipped { reason } => {
                println!("{:>6} skipped: {}", point.count, reason);
            }
        }
    }

    if let Some(best) = best_point(&points) {
        println!("\n✓ Best single-hand success at {} {}", best.count, card);
    }
}

fn list_presets() {
    println!("Deck size presets:");
    for preset in DeckSize::ALL {
        match preset.total() {
            Some(total) => println!("  {:<8} {} cards, OtherCards fills the rest", preset.label(), total),
            None => println!("  {:<8} OtherCards given with --other", preset.label()),
        }
    }
}
