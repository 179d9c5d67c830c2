//! Filler-MCTS command line.
//!
//! ## Usage
//!
//! - `filler-mcts` - Play one demo match (MCTS vs greedy)
//! - `filler-mcts play --opponent lookahead --depth 3` - Play a configured match
//! - `filler-mcts suggest --seed 7` - Show a board and the engine's move for it

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use filler_mcts::constants::{DEFAULT_COLS, DEFAULT_ROWS, EXPLORATION, INTELLIGENCE, N_ITERATIONS};
use filler_mcts::game::{OwnColorRule, Player};
use filler_mcts::generate::random_game;
use filler_mcts::mcts::{SearchConfig, SearchEngine};
use filler_mcts::play::{Strategy, play_game};

/// Filler-MCTS: Monte Carlo Tree Search for the color-capture game
#[derive(Parser)]
#[command(name = "filler-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log search details
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full match between the engine and another strategy
    Play(MatchArgs),
    /// Print a board and the engine's move for it
    Suggest(GameArgs),
}

#[derive(Args, Clone)]
struct GameArgs {
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Random seed (board, search and opponent)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = N_ITERATIONS)]
    iterations: usize,
    #[arg(long, default_value_t = EXPLORATION)]
    exploration: f64,
    #[arg(long, default_value_t = INTELLIGENCE)]
    intelligence: f64,
    /// Forbid choosing your own current color
    #[arg(long)]
    strict_own_color: bool,
    /// Which player the engine controls (1 or 2)
    #[arg(long, default_value_t = 1)]
    mcts_player: u8,
}

#[derive(Args, Clone)]
struct MatchArgs {
    #[command(flatten)]
    game: GameArgs,
    #[arg(long, value_enum, default_value_t = Opponent::Greedy)]
    opponent: Opponent,
    /// Lookahead depth for the `lookahead` opponent
    #[arg(long, default_value_t = 3)]
    depth: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum Opponent {
    Random,
    Greedy,
    Lookahead,
    Mcts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play(args)) => run_match(&args, cli.verbose),
        Some(Commands::Suggest(args)) => run_suggest(&args, cli.verbose),
        None => run_match(
            &MatchArgs {
                game: GameArgs {
                    rows: DEFAULT_ROWS,
                    cols: DEFAULT_COLS,
                    seed: None,
                    iterations: N_ITERATIONS,
                    exploration: EXPLORATION,
                    intelligence: INTELLIGENCE,
                    strict_own_color: false,
                    mcts_player: 1,
                },
                opponent: Opponent::Greedy,
                depth: 3,
            },
            cli.verbose,
        ),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "filler_mcts=debug" } else { "filler_mcts=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn search_config(args: &GameArgs, verbose: bool) -> SearchConfig {
    SearchConfig::default()
        .with_exploration(args.exploration)
        .with_intelligence(args.intelligence)
        .with_iterations(args.iterations)
        .with_verbose(verbose)
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

fn rule(args: &GameArgs) -> OwnColorRule {
    if args.strict_own_color {
        OwnColorRule::Forbidden
    } else {
        OwnColorRule::Permitted
    }
}

fn run_match(args: &MatchArgs, verbose: bool) -> Result<()> {
    let mut rng = make_rng(args.game.seed);
    let engine_player = Player::from_id(args.game.mcts_player).context("bad --mcts-player")?;
    let mut game = random_game(args.game.rows, args.game.cols, &mut rng)
        .context("failed to generate board")?
        .with_rule(rule(&args.game));

    let engine = Strategy::Mcts(search_config(&args.game, verbose));
    let opponent = match args.opponent {
        Opponent::Random => Strategy::Random,
        Opponent::Greedy => Strategy::Greedy,
        Opponent::Lookahead => Strategy::Lookahead(args.depth),
        Opponent::Mcts => Strategy::Mcts(search_config(&args.game, false)),
    };
    let strategies = match engine_player {
        Player::One => [engine, opponent],
        Player::Two => [opponent, engine],
    };

    println!("{game}");
    let record = play_game(&mut game, &strategies, Player::One, &mut rng).context("match failed")?;
    println!("{game}");

    let (s1, s2) = record.score;
    match record.winner {
        Some(p) => println!("{p} wins {s1} - {s2} after {} moves", record.moves.len()),
        None if record.finished => println!("draw {s1} - {s2}"),
        None => println!("unfinished after {} moves ({s1} - {s2})", record.moves.len()),
    }
    Ok(())
}

fn run_suggest(args: &GameArgs, verbose: bool) -> Result<()> {
    let mut rng = make_rng(args.seed);
    let player = Player::from_id(args.mcts_player).context("bad --mcts-player")?;
    let game = random_game(args.rows, args.cols, &mut rng)
        .context("failed to generate board")?
        .with_rule(rule(args));
    println!("{game}");

    let mut engine = SearchEngine::new(&game, player, search_config(args, verbose), rng);
    let color = engine
        .select_move(args.iterations, verbose)
        .context("search failed")?;
    for s in engine.root_stats() {
        println!(
            "{:<7} visits={:<5} ratio={:.3} wr={:.3}",
            s.color, s.visits, s.ratio, s.win_percentage
        );
    }
    println!("{player} should play {color} (greedy: {})", game.greedy_move(player));
    Ok(())
}
