use anyhow::Result;
use clap::Parser;
use neighborhood_stories::config;
use neighborhood_stories::notify::LogAlertSink;
use neighborhood_stories::session::Session;
use neighborhood_stories::store::StoryStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML page config (falls back to the built-in sample page)
    #[arg(long, default_value = "stories.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load_or_example(&args.config)?;
    let store = StoryStore::with_stories(cfg.seed_stories());
    let mut session = Session::new(store, Box::new(LogAlertSink));

    info!(stories = session.store().len(), "page ready");

    println!("{}", cfg.page.title);
    println!("{}", cfg.page.tagline);
    println!("Type 'help' for commands.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let reply = session.handle_line(line.trim_end_matches(['\r', '\n']));
        for out in &reply.lines {
            println!("{out}");
        }
        if reply.quit {
            break;
        }
    }

    println!("{}", cfg.page.footer);
    Ok(())
}
