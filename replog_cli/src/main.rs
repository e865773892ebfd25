use clap::{Parser, Subcommand};
use replog_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "replog")]
#[command(about = "Workout session logger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a new workout session
    Log {
        /// Walk the built-in workout plan instead of free-form entry
        #[arg(long)]
        plan: bool,

        /// Keep only this session, discarding prior history
        #[arg(long)]
        replace_latest: bool,
    },

    /// Show the recorded workout history
    History,

    /// Compare the latest one-rep-max against the previous one
    Overload,

    /// Export the history to CSV
    Export {
        /// Output path (defaults to <data-dir>/workouts.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Clear the recorded history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Run a standalone rest timer
    Rest {
        /// Duration in seconds (defaults to the configured rest length)
        #[arg(long)]
        seconds: Option<u32>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    replog_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Log {
            plan,
            replace_latest,
        }) => {
            let mut feed = LineFeed::from_stdin();
            cmd_log(&config, &data_dir, &mut feed, plan, replace_latest)
        }
        Some(Commands::History) => cmd_history(&config, &data_dir),
        Some(Commands::Overload) => cmd_overload(&config, &data_dir),
        Some(Commands::Export { out }) => cmd_export(&config, &data_dir, out),
        Some(Commands::Clear { yes }) => {
            let mut feed = LineFeed::from_stdin();
            cmd_clear(&config, &data_dir, &mut feed, yes)
        }
        Some(Commands::Rest { seconds }) => {
            let feed = LineFeed::from_stdin();
            cmd_rest(&config, &feed, seconds)
        }
        None => {
            // Default to the interactive menu
            let mut feed = LineFeed::from_stdin();
            run_menu(&config, &data_dir, &mut feed)
        }
    }
}

fn run_menu(config: &Config, data_dir: &PathBuf, feed: &mut LineFeed) -> Result<()> {
    loop {
        println!();
        println!("WORKOUT TRACKER");
        println!();
        println!("1. Start session");
        println!("2. View log");
        println!("3. Overload check");
        println!("4. Export data");
        println!("5. Clear workouts");
        println!("6. Exit");
        print!("> ");
        io::stdout().flush()?;

        let mut choice = String::new();
        if feed.read_line(&mut choice)? == 0 {
            break;
        }

        match choice.trim() {
            "1" => cmd_log(config, data_dir, feed, false, false)?,
            "2" => cmd_history(config, data_dir)?,
            "3" => cmd_overload(config, data_dir)?,
            "4" => cmd_export(config, data_dir, None)?,
            "5" => cmd_clear(config, data_dir, feed, false)?,
            "6" => break,
            other => println!("Invalid choice: {}", other),
        }
    }

    Ok(())
}

fn cmd_log(
    config: &Config,
    data_dir: &PathBuf,
    feed: &mut LineFeed,
    use_plan: bool,
    replace_latest: bool,
) -> Result<()> {
    let policy = if replace_latest {
        PersistPolicy::ReplaceLatest
    } else {
        config.storage.policy
    };
    let mut store = EntryStore::open(policy, data_dir);

    // Interrupt strategy chosen at startup from config
    let interrupt: Box<dyn InterruptSource> = if config.timer.interruptible {
        Box::new(feed.interrupt())
    } else {
        Box::new(NeverInterrupt)
    };
    let rest = Some(RestBehavior {
        timer: RestTimer::new(config.timer.rest_seconds),
        interrupt,
    });

    let stdout = io::stdout();
    let mut controller = SessionController::new(&mut *feed, stdout.lock(), rest);

    if use_plan {
        let plan = plan::plan_with_customs(&config.plan);
        controller.run_plan(&mut store, &plan)?;
    } else {
        controller.run_free_form(&mut store)?;
    }

    Ok(())
}

fn cmd_history(config: &Config, data_dir: &PathBuf) -> Result<()> {
    let store = EntryStore::open(config.storage.policy, data_dir);
    let history = store.load()?;

    if history.is_empty() {
        println!("No workouts saved.");
        return Ok(());
    }

    println!("WORKOUT LOG");
    for (i, record) in history.iter().enumerate() {
        println!();
        println!("--- Session {} ---", i + 1);
        println!("{}", record.render_summary());
    }

    Ok(())
}

fn cmd_overload(config: &Config, data_dir: &PathBuf) -> Result<()> {
    let store = EntryStore::open(config.storage.policy, data_dir);
    let history = store.load()?;

    println!("PROGRESSIVE OVERLOAD");
    println!();
    println!("{}", overload::compare(&history).describe());

    Ok(())
}

fn cmd_export(config: &Config, data_dir: &PathBuf, out: Option<PathBuf>) -> Result<()> {
    let store = EntryStore::open(config.storage.policy, data_dir);
    let history = store.load()?;

    let path = out.unwrap_or_else(|| data_dir.join("workouts.csv"));
    let count = export_csv(&history, &path)?;

    println!("Exported {} entries to {}", count, path.display());
    Ok(())
}

fn cmd_clear(config: &Config, data_dir: &PathBuf, feed: &mut LineFeed, yes: bool) -> Result<()> {
    let mut store = EntryStore::open(config.storage.policy, data_dir);

    let confirmed = if yes {
        true
    } else {
        print!("Clear all? (y/n): ");
        io::stdout().flush()?;
        let mut answer = String::new();
        feed.read_line(&mut answer)?;
        answer.trim().eq_ignore_ascii_case("y")
    };

    if confirmed {
        store.clear()?;
        println!("Cleared.");
    } else {
        println!("Canceled.");
    }

    Ok(())
}

fn cmd_rest(config: &Config, feed: &LineFeed, seconds: Option<u32>) -> Result<()> {
    let duration = seconds.unwrap_or(config.timer.rest_seconds);

    let mut interrupt: Box<dyn InterruptSource> = if config.timer.interruptible {
        println!(
            "Rest for {}. (Press Enter to skip)",
            timer::format_mm_ss(duration)
        );
        Box::new(feed.interrupt())
    } else {
        println!("Rest for {}.", timer::format_mm_ss(duration));
        Box::new(NeverInterrupt)
    };

    let mut stdout = io::stdout();
    RestTimer::new(duration).run(interrupt.as_mut(), &mut stdout)?;
    Ok(())
}
