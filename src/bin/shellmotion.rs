use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
    str::FromStr,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "shellmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default shell configuration as JSON.
    Config,
    /// Validate a shell configuration file.
    Check(CheckArgs),
    /// Mount the shell on a headless page and print the resulting inline styles.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Shell configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page fixture JSON.
    #[arg(long)]
    page: PathBuf,

    /// Shell configuration JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pointer move over an element, as `ID:X,Y` in viewport coordinates. Repeatable.
    #[arg(long)]
    hover: Vec<Hover>,

    /// Scroll the document to this offset. Repeatable; applied in order after hovers.
    #[arg(long)]
    scroll: Vec<f64>,

    /// Seconds of animation time to advance after scrolling.
    #[arg(long, default_value_t = 0.0)]
    advance: f64,

    /// Dispose the scope before printing.
    #[arg(long)]
    dispose: bool,
}

#[derive(Clone, Debug)]
struct Hover {
    id: String,
    x: f64,
    y: f64,
}

impl FromStr for Hover {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, point) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("hover '{s}' must be ID:X,Y"))?;
        let (x, y) = point
            .split_once(',')
            .ok_or_else(|| format!("hover point '{point}' must be X,Y"))?;
        let x = x.trim().parse().map_err(|_| format!("bad hover x '{x}'"))?;
        let y = y.trim().parse().map_err(|_| format!("bad hover y '{y}'"))?;
        Ok(Self {
            id: id.to_owned(),
            x,
            y,
        })
    }
}

#[derive(serde::Serialize)]
struct SimulationReport {
    now: f64,
    scroll_y: f64,
    effects: usize,
    listeners: usize,
    elements: Vec<shellmotion::ElementSnapshot>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Config => cmd_config(),
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))?;
    Ok(value)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<shellmotion::ShellConfig> {
    let config = match path {
        Some(path) => read_json(path, "config")?,
        None => shellmotion::ShellConfig::default(),
    };
    config.validate().context("invalid shell configuration")?;
    Ok(config)
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&shellmotion::ShellConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    read_config(Some(&args.config))?;
    println!("ok: {}", args.config.display());
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    use shellmotion::Dom as _;

    let config = read_config(args.config.as_deref())?;
    let fixture: shellmotion::PageFixture = read_json(&args.page, "page fixture")?;
    if !args.advance.is_finite() || args.advance < 0.0 {
        anyhow::bail!("--advance must be finite and >= 0");
    }

    let (dom, root) = shellmotion::MemoryDom::from_fixture(&fixture).context("build page")?;
    let dom = Rc::new(dom);
    let runtime = shellmotion::MotionRuntime::new(Rc::clone(&dom) as Rc<dyn shellmotion::Dom>)
        .into_handle();
    let mut scope = shellmotion::RootScope::create(&runtime, root, &config)?;

    for hover in &args.hover {
        let el = dom
            .element_by_id(&hover.id)
            .with_context(|| format!("no element with id '{}'", hover.id))?;
        let event = shellmotion::PointerEvent {
            client: shellmotion::Point::new(hover.x, hover.y),
        };
        dom.dispatch(el, shellmotion::EventKind::PointerMove, event);
    }
    for &y in &args.scroll {
        dom.set_scroll_y(y);
        runtime.on_scroll();
    }
    let now = runtime.borrow().now() + args.advance;
    runtime.tick(now);

    if args.dispose {
        scope.dispose();
    }

    let report = SimulationReport {
        now,
        scroll_y: dom.viewport().scroll_y,
        effects: runtime.borrow().active_effects(),
        listeners: dom.total_listeners(),
        elements: dom.snapshot(root),
    };
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    println!("{json}");
    Ok(())
}
