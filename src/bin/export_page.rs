use anyhow::{Context, Result};
use clap::Parser;
use neighborhood_stories::config::{self, Config};
use neighborhood_stories::model::Story;
use neighborhood_stories::store::StoryStore;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Render the story page to a standalone local HTML file.")]
struct Args {
    /// Path to YAML page config (falls back to the built-in sample page)
    #[arg(long, default_value = "stories.yaml")]
    config: PathBuf,

    /// Output HTML file
    #[arg(long, default_value = "html/index.html")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = config::load_or_example(&args.config)?;
    let store = StoryStore::with_stories(cfg.seed_stories());

    let html = render_page(&cfg, &store.snapshot());
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(&args.out, html).with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn render_page(cfg: &Config, stories: &[Story]) -> String {
    let cards: String = stories.iter().map(render_card).collect();

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{}</title>
    <style>
      body {{ font-family: sans-serif; max-width: 28rem; margin: 0 auto; padding: 1rem; }}
      .card {{ border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }}
      .teaser {{ color: #555; }}
      .meta {{ font-size: 0.85rem; color: #777; }}
      .forming {{ color: #b35c00; font-weight: bold; }}
      footer {{ font-size: 0.8rem; color: #999; text-align: center; margin-top: 2rem; }}
    </style>
  </head>
  <body>
    <header>
      <h1>{}</h1>
      <p>{}</p>
    </header>
    <main>
      <h2>Recent Stories</h2>
{}    </main>
    <footer>{}</footer>
  </body>
</html>"#,
        html_escape(&cfg.page.title),
        html_escape(&cfg.page.title),
        html_escape(&cfg.page.tagline),
        cards,
        html_escape(&cfg.page.footer),
    )
}

fn render_card(story: &Story) -> String {
    let forming = if story.is_forming_event() {
        r#" <span class="forming">event forming!</span>"#
    } else {
        ""
    };
    let credit = match &story.name {
        Some(name) => format!(" &middot; shared by {}", html_escape(name)),
        None => String::new(),
    };
    let venue = match story.venue {
        Some(v) => format!(" &middot; {}", html_escape(v.label())),
        None => String::new(),
    };

    format!(
        r#"      <div class="card">
        <h3>{}</h3>
        <p class="teaser">{}</p>
        <p class="meta">{} interested{}{}{}</p>
      </div>
"#,
        html_escape(&story.title),
        html_escape(&story.teaser),
        story.interest_count,
        forming,
        credit,
        venue,
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
