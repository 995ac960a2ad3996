use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "papercut", version)]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a scene and write it as SVG or PNG.
    Render(RenderArgs),
    /// Print (or write) the default parameter set as JSON.
    Defaults(DefaultsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Parameter JSON; every field is optional.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the `--out` extension when omitted.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Override the warp seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Reject out-of-range parameters instead of clamping them.
    #[arg(long)]
    strict: bool,

    /// Print cache statistics as JSON on stderr.
    #[arg(long)]
    stats: bool,
}

#[derive(Parser, Debug)]
struct DefaultsArgs {
    /// Write here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => anyhow::bail!(
                "cannot infer output format from '{}'; pass --format",
                path.display()
            ),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Defaults(args) => cmd_defaults(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut params = match &args.params {
        Some(path) => papercut::Params::from_path(path)?,
        None => papercut::Params::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let params = if args.strict {
        params.validate()?;
        params
    } else {
        params.clamped()
    };

    let format = match args.format {
        Some(f) => f,
        None => OutputFormat::from_path(&args.out)?,
    };

    let mut generator = papercut::Generator::default();
    let scene = generator.generate(&params)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    match format {
        OutputFormat::Svg => {
            let svg = papercut::to_svg_string(&scene)?;
            std::fs::write(&args.out, svg)
                .with_context(|| format!("write svg '{}'", args.out.display()))?;
        }
        OutputFormat::Png => {
            let img = papercut::rasterize(&scene)?;
            papercut::write_png(&img, &args.out)?;
        }
    }

    if args.stats {
        let stats = serde_json::to_string(&generator.cache_stats())?;
        eprintln!("{stats}");
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_defaults(args: DefaultsArgs) -> anyhow::Result<()> {
    let json = papercut::Params::default().to_json_pretty()?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
