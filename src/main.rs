use appicon_gen::catalog::Platform;
use appicon_gen::export::{ExportOptions, ExportRequest, export_all};
use appicon_gen::imaging::{Density, RustBackend, supported_input_extensions};
use appicon_gen::source::{Session, resolve_input};
use appicon_gen::{config, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "appicon-gen")]
#[command(about = "Export iOS and macOS app-icon sets from a single image")]
#[command(long_about = "\
Export iOS and macOS app-icon sets from a single image

Every size the platform needs is written as a PNG named after the source:

  Icon.png --platform macos --out AppIcon/

  AppIcon/
  ├── Icon_16x16@1x.png        16px
  ├── Icon_16x16@2x.png        32px
  ├── ...
  └── Icon_512x512@2x.png    1024px

Run 'appicon-gen sizes' to list every size, and 'appicon-gen gen-config' to
generate a documented appicon.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to ./appicon.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the icon set for a platform into a directory
    Export(ExportArgs),
    /// List the icon sizes of one or both platforms
    Sizes {
        /// Only list this platform (ios, macos)
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Open an image and report whether it can be used as a source
    Check {
        /// Image path or file:// URL
        image: String,
    },
    /// Print a stock appicon.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Image path or file:// URL
    image: String,

    /// Target platform (ios, macos)
    #[arg(long, short)]
    platform: Platform,

    /// Destination directory
    #[arg(long, short)]
    out: PathBuf,

    /// Create the destination directory if it does not exist
    #[arg(long)]
    mkdir: bool,

    /// Points-to-pixels ratio of the rendering surface
    #[arg(long)]
    density: Option<f64>,

    /// Render icons in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the export report as JSON instead of progress lines
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Export(args) => {
            let cwd = std::env::current_dir()?;
            let app_config = config::load_config(cli.config.as_deref(), &cwd)?;
            run_export(args, &app_config)?;
        }
        Command::Sizes { platform } => {
            let platforms = match platform {
                Some(p) => vec![p],
                None => Platform::ALL.to_vec(),
            };
            for (idx, platform) in platforms.into_iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                output::print_catalog(platform);
            }
        }
        Command::Check { image } => {
            let path = resolve_input(&image)?;
            let mut session = Session::new();
            session.open(&RustBackend::new(), &path)?;
            output::print_source(session.current()?);
            output::print_supported_formats(supported_input_extensions());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_export(
    args: ExportArgs,
    app_config: &config::AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = RustBackend::new();
    let path = resolve_input(&args.image)?;
    let mut session = Session::new();
    session.open(&backend, &path)?;
    let source = session.current()?;
    let base_name = source.base_name();

    if args.mkdir {
        std::fs::create_dir_all(&args.out)?;
    }

    let mut render = app_config.render_config();
    if let Some(density) = args.density {
        render.density = Density::try_new(density).ok_or_else(|| {
            format!(
                "--density must be between {} and {}, got {density}",
                Density::MIN,
                Density::MAX
            )
        })?;
    }
    let options = ExportOptions {
        render,
        parallel: args.parallel || app_config.export.parallel,
    };
    if options.parallel {
        init_thread_pool(&app_config.processing);
    }

    let request = ExportRequest::for_platform(source, &base_name, args.platform, &args.out);

    if args.json {
        let report = export_all(&backend, &request, &options, None)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_export_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = export_all(&backend, &request, &options, Some(tx));
    printer.join().ok();
    let report = result?;
    output::print_export_summary(&report);

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
