use advisor_core::{advise, StrategyReport, StrategyRequest, DEFAULT_TRIALS};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "advise",
    about = "Recommend a blackjack move and estimate its odds"
)]
struct Args {
    /// First player card (2-10, J, Q, K, A)
    card1: String,

    /// Second player card
    card2: String,

    /// Dealer up-card
    dealer: String,

    /// Trials per estimation pass
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: u32,

    /// Seed for a reproducible run (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut request = StrategyRequest::new(&args.card1, &args.card2, &args.dealer);
    request.trials = args.trials;
    request.seed = args.seed;

    let report = match advise(&request) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Serialization failed: {err}");
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

fn print_report(report: &StrategyReport) {
    let estimate = &report.estimate;
    println!(
        "Hand:               {} ({}{}) vs {}",
        report.player_cards,
        if report.is_soft { "soft " } else { "" },
        report.total,
        report.dealer_card
    );
    println!("Recommended move:   {}", report.recommended_move);
    println!(
        "Bust on next card:  {:.1}%",
        estimate.player_bust_probability * 100.0
    );
    println!(
        "Dealer busts:       {:.1}%",
        estimate.dealer_bust_probability * 100.0
    );
    println!(
        "Dealer makes hand:  {:.1}%",
        estimate.dealer_makes_hand_probability * 100.0
    );
    println!("Expected value:     {:+.3}", estimate.expected_value);
    println!();
    println!("{}", report.explanation);
}
