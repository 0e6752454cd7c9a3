//! sprite-use - render one `<use>` reference through the polyfill
//!
//! Fetches the sprite sheet, transplants the symbol into a host document and
//! prints the resulting `<svg>` markup.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use sprite_polyfill::dom::{Document, SharedSurface};
use sprite_polyfill::html::MarkupSerializer;
use sprite_polyfill::net::Url;
use sprite_polyfill::{Config, RenderMode, SpriteEngine, SyncOutcome, UseProps};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sprite-use", version)]
#[command(about = "Render an SVG sprite reference the way the <use> polyfill would")]
struct Args {
    /// Reference to render, e.g. `icons.svg#close`
    href: String,

    /// Base URL relative references resolve against (default: current directory)
    #[arg(long, value_name = "URL")]
    base: Option<String>,

    /// Polyfill regardless of the user agent
    #[arg(long)]
    force: bool,

    /// User agent used for environment detection
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Pretend to run inside an iframe
    #[arg(long)]
    in_frame: bool,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Extra attribute for the rendered <svg>, as name=value
    #[arg(long = "attr", value_name = "NAME=VALUE")]
    attributes: Vec<String>,

    /// Indent the output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_tracing();

    let config = load_config(&args)?;
    let engine = SpriteEngine::from_config(config)?;

    let mut props = UseProps::new(args.href.as_str()).force(args.force);
    for attr in &args.attributes {
        let (name, value) = attr
            .split_once('=')
            .with_context(|| format!("attribute {attr:?} is not name=value"))?;
        props = props.attribute(name, value);
    }

    let host = Rc::new(RefCell::new(Document::new(engine.loader().base().as_str())));
    let mut icon = engine.component::<SharedSurface>(props);

    let body = host.borrow().body();
    let node = icon.render(host.borrow_mut().tree_mut(), body)?;
    icon.attach(SharedSurface::new(&host, node));

    let outcome = smol::block_on(icon.synchronize(engine.loader()));
    tracing::info!("{} rendered {:?}: {:?}", args.href, icon.mode(), outcome);

    let serializer = if args.pretty {
        MarkupSerializer::pretty()
    } else {
        MarkupSerializer::new()
    };
    println!("{}", serializer.serialize_outer(host.borrow().tree(), node));

    if icon.mode() == RenderMode::Polyfilled && outcome == SyncOutcome::Failed {
        anyhow::bail!("sprite for {} could not be loaded", args.href);
    }
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Config::from_json(&json)?
        }
        None => {
            let cwd = std::env::current_dir()?;
            let base = Url::from_directory_path(&cwd)
                .map_err(|()| anyhow::anyhow!("{} is not an absolute path", cwd.display()))?;
            Config {
                base_url: base.to_string(),
                ..Config::default()
            }
        }
    };

    if let Some(base) = &args.base {
        config.base_url = base.clone();
    }
    if let Some(ua) = &args.user_agent {
        config.user_agent = ua.clone();
    }
    config.nested_in_frame |= args.in_frame;
    config.force_polyfill |= args.force;
    Ok(config)
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
