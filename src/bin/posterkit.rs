use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use posterkit::{
    CpuRasterizer, DirSink, Exporter, FontBook, MetaPatch, PosterConfig, PosterRenderer,
    PosterSession, PosterState, SurfaceSize, TracingNotifier,
};

const LOG_ENV_VAR: &str = "POSTERKIT_LOG";

#[derive(Parser, Debug)]
#[command(name = "posterkit", version, about = "Compose and export greeting posters")]
struct Cli {
    /// Log debug events (overridden by POSTERKIT_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the poster at 3x as a timestamped PNG.
    Export(ExportArgs),
    /// Render the poster once at a chosen scale, without the export pipeline.
    Preview(PreviewArgs),
    /// List the template catalog.
    Templates(TemplatesArgs),
    /// Point the Open Graph meta tag of a web build at the emitted image.
    PatchMeta(PatchMetaArgs),
}

/// Poster inputs shared by `export` and `preview`. Flags override the config file.
#[derive(Args, Debug)]
struct PosterArgs {
    /// Poster config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Template id (see `templates`).
    #[arg(long)]
    template: Option<String>,

    /// Person's name.
    #[arg(long)]
    name: Option<String>,

    /// Person's title.
    #[arg(long)]
    designation: Option<String>,

    /// Photo file.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Surface width in logical pixels (3:4 portrait).
    #[arg(long)]
    width: Option<u32>,

    /// Body font file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Logo image.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Seed for the decorative sparkles.
    #[arg(long, default_value_t = 2026)]
    sparkle_seed: u64,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    poster: PosterArgs,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    poster: PosterArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Device pixels per logical pixel.
    #[arg(long, default_value_t = 1)]
    scale: u32,
}

#[derive(Args, Debug)]
struct TemplatesArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    json: bool,

    /// Write one thumbnail PNG per template into this directory.
    #[arg(long)]
    thumbnails: Option<PathBuf>,

    /// Font file for thumbnail captions.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PatchMetaArgs {
    /// Build output directory holding index.html.
    #[arg(long)]
    dist: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Templates(args) => cmd_templates(args),
        Command::PatchMeta(args) => cmd_patch_meta(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "posterkit=debug"
    } else {
        "posterkit=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &PosterArgs) -> anyhow::Result<PosterConfig> {
    let mut cfg = match &args.config {
        Some(path) => PosterConfig::from_path(path)?,
        None => PosterConfig::default(),
    };
    if args.template.is_some() {
        cfg.template = args.template.clone();
    }
    if args.name.is_some() {
        cfg.name = args.name.clone();
    }
    if args.designation.is_some() {
        cfg.designation = args.designation.clone();
    }
    if args.photo.is_some() {
        cfg.photo = args.photo.clone();
    }
    if args.width.is_some() {
        cfg.width = args.width;
    }
    if args.font.is_some() {
        cfg.fonts.body = args.font.clone();
    }
    if args.logo.is_some() {
        cfg.logo = args.logo.clone();
    }
    cfg.apply_env();
    Ok(cfg)
}

fn make_renderer(cfg: &PosterConfig, sparkle_seed: u64) -> anyhow::Result<PosterRenderer> {
    let logo = cfg
        .logo
        .as_deref()
        .map(|p| std::fs::read(p).with_context(|| format!("read logo '{}'", p.display())))
        .transpose()?
        .map(Arc::from);
    Ok(PosterRenderer::new(cfg.surface_size()?)
        .with_brand(cfg.brand.clone())
        .with_logo(logo)
        .with_sparkle_seed(sparkle_seed))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.poster)?;
    let renderer = make_renderer(&cfg, args.poster.sparkle_seed)?;
    let raster = CpuRasterizer::new(&FontBook::load(&cfg.fonts)?)?;
    let exporter = Exporter::new(Arc::new(DirSink::new(&args.out)), Arc::new(TracingNotifier));
    let mut session = PosterSession::new(renderer, raster, exporter);

    if let Some(id) = &cfg.template {
        session.select_template(id)?;
    }
    session.set_name(cfg.name.clone().unwrap_or_default());
    session.set_designation(cfg.designation.clone().unwrap_or_default());
    // Already reported through the notifier; the poster keeps its placeholder.
    if let Err(e) = session.upload_photo(cfg.photo.as_deref()) {
        tracing::debug!(error = %e, "photo upload rejected");
    }

    for e in session.validate() {
        tracing::warn!(field = ?e.field, "{}", e.message);
    }

    let saved = session.export()?;
    println!("{}", saved.path.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.poster)?;
    let renderer = make_renderer(&cfg, args.poster.sparkle_seed)?;
    let mut raster = CpuRasterizer::new(&FontBook::load(&cfg.fonts)?)?;

    let mut state = PosterState::new();
    if let Some(id) = &cfg.template {
        state.select_template(id)?;
    }
    state.set_name(cfg.name.clone().unwrap_or_default());
    state.set_designation(cfg.designation.clone().unwrap_or_default());
    if let Err(e) = state.apply_upload(cfg.photo.as_deref()) {
        tracing::warn!(error = %e, "photo not loaded");
    }

    let frame = raster.rasterize(&renderer.render_state(&state), args.scale)?;
    write_png(&args.out, &posterkit::encode_png(&frame)?)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(posterkit::catalog())?);
    } else {
        for t in posterkit::catalog() {
            println!("{:<18} {:<16} {:?}", t.id, t.display_name, t.text_mode);
        }
    }

    if let Some(dir) = &args.thumbnails {
        let fonts = posterkit::FontConfig {
            body: args.font.clone(),
            ..Default::default()
        };
        let mut raster = CpuRasterizer::new(&FontBook::load(&fonts)?)?;
        let size = SurfaceSize::portrait_3x4(160)?;
        for t in posterkit::catalog() {
            let frame = raster.rasterize(&posterkit::render_thumbnail(t.id, size), 1)?;
            let path = dir.join(format!("{}.png", t.id));
            write_png(&path, &posterkit::encode_png(&frame)?)?;
        }
        eprintln!("wrote {} thumbnails to {}", posterkit::catalog().len(), dir.display());
    }
    Ok(())
}

fn cmd_patch_meta(args: PatchMetaArgs) -> anyhow::Result<()> {
    match posterkit::patch_opengraph_meta(&args.dist)? {
        MetaPatch::NoEntryHtml => eprintln!("no index.html in {}", args.dist.display()),
        MetaPatch::NoAsset => eprintln!("no opengraph asset in {}", args.dist.display()),
        MetaPatch::Patched { url, replacements } => {
            eprintln!("patched {replacements} meta tag(s) to {url}")
        }
    }
    Ok(())
}

fn write_png(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}
