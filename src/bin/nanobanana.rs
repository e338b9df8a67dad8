use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use nanobanana::compose::{self, CombineOptions};
use nanobanana::config::{Config, Overrides};
use nanobanana::gemini::{
    self, GeminiClient, IconStyle, ImageConfig, PatternStyle, PatternType, build_icon_prompt,
    build_pattern_prompt, estimate_dimensions, numbered_output_path, snap_aspect_ratio,
};
use nanobanana::output::{ErrorInfo, Formatter, ImageResult, Timing};
use nanobanana::raster;
use nanobanana::transform::{self, FitMode, ResizeSpec, TransformRequest};
use nanobanana::transparency::{self, TransparencyOptions};
use nanobanana::{NanobananaError, NanobananaResult};

#[derive(Parser, Debug)]
#[command(
    name = "nanobanana",
    version,
    about = "Generate images with Gemini and transform them locally"
)]
struct Cli {
    /// Gemini API key (or set GEMINI_API_KEY).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model: flash (default), pro, or a full model id.
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Print a JSON envelope instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress progress output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate images from a text prompt, or edit an image with `-i`.
    Generate(GenerateArgs),
    /// Generate one icon and write it in several square sizes.
    Icon(IconArgs),
    /// Generate a tileable pattern or texture.
    Pattern(PatternArgs),
    /// Crop, resize, rotate, flip or flop an image.
    Transform(TransformArgs),
    /// Combine images into a strip or grid.
    Combine(CombineArgs),
    /// Remove a background color or inspect transparency.
    #[command(subcommand)]
    Transparent(TransparentCommand),
    /// Print version information.
    Version,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Generate(_) => "generate",
            Self::Icon(_) => "icon",
            Self::Pattern(_) => "pattern",
            Self::Transform(_) => "transform",
            Self::Combine(_) => "combine",
            Self::Transparent(TransparentCommand::Make(_)) => "transparent make",
            Self::Transparent(TransparentCommand::Inspect(_)) => "transparent inspect",
            Self::Version => "version",
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Prompt words; joined with spaces.
    #[arg(required = true)]
    prompt: Vec<String>,

    /// Output file path.
    #[arg(short, long)]
    output: PathBuf,

    /// Input image to edit.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of images (1-10).
    #[arg(short, long, default_value_t = 1)]
    count: u32,

    /// Aspect ratio: 1:1, 3:2, 2:3, 3:4, 4:3, 4:5, 5:4, 9:16, 16:9, 21:9.
    #[arg(long, default_value = "1:1")]
    aspect_ratio: String,

    /// Resolution: 1K, 2K, 4K (4K only with the pro model).
    #[arg(long, default_value = "")]
    resolution: String,

    /// Fail if the output file already exists.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct IconArgs {
    #[arg(required = true)]
    prompt: Vec<String>,

    /// Output directory, or a file pattern containing `{size}`.
    #[arg(short, long)]
    output: String,

    /// Icon sizes in pixels (16-2048).
    #[arg(long, value_delimiter = ',', default_values_t = [64, 128, 256, 512])]
    sizes: Vec<u32>,

    /// Style: modern, flat, minimal, detailed.
    #[arg(long, default_value = "modern")]
    style: String,

    /// Background: transparent, white, black, or #RRGGBB.
    #[arg(long, default_value = "transparent")]
    background: String,
}

#[derive(Args, Debug)]
struct PatternArgs {
    #[arg(required = true)]
    prompt: Vec<String>,

    #[arg(short, long)]
    output: PathBuf,

    /// Tile size WxH (64-2048 per side).
    #[arg(long, default_value = "512x512")]
    size: String,

    /// Style: geometric, organic, abstract, floral, tech.
    #[arg(long, default_value = "")]
    style: String,

    /// Type: seamless, texture, wallpaper.
    #[arg(long = "type", default_value = "seamless")]
    kind: String,
}

#[derive(Args, Debug)]
struct TransformArgs {
    input: PathBuf,

    #[arg(short, long)]
    output: PathBuf,

    /// WxH or N%.
    #[arg(long)]
    resize: Option<String>,

    /// Fit mode: cover, contain, fill, inside, outside.
    #[arg(long, default_value = "inside")]
    fit: String,

    /// left,top,width,height in pixels.
    #[arg(long)]
    crop: Option<String>,

    /// Degrees counter-clockwise (-360 to 360).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate: f64,

    /// Mirror vertically.
    #[arg(long)]
    flip: bool,

    /// Mirror horizontally.
    #[arg(long)]
    flop: bool,
}

#[derive(Args, Debug)]
struct CombineArgs {
    /// Image paths or glob patterns.
    #[arg(required = true)]
    images: Vec<String>,

    #[arg(short, long)]
    output: PathBuf,

    /// horizontal, vertical or grid.
    #[arg(long, default_value = "horizontal")]
    direction: String,

    /// Gap between images in pixels.
    #[arg(long, default_value_t = 0)]
    gap: u32,

    /// Grid columns (0 = auto).
    #[arg(long, default_value_t = 0)]
    columns: u32,

    /// start, center or end.
    #[arg(long, default_value = "center")]
    align: String,

    /// transparent, white, black, or #RRGGBB.
    #[arg(long, default_value = "transparent")]
    background: String,
}

#[derive(Subcommand, Debug)]
enum TransparentCommand {
    /// Make a background color transparent.
    Make(TransparentMakeArgs),
    /// Report alpha usage and the dominant edge color.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct TransparentMakeArgs {
    input: PathBuf,

    /// Output path (default: <input>_transparent.png).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Color to remove: white, black, or #RRGGBB.
    #[arg(long, default_value = "white")]
    color: String,

    /// Match tolerance in percent (0-100).
    #[arg(long, default_value_t = transparency::DEFAULT_TOLERANCE)]
    tolerance: u32,

    /// Replace the input file.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let out = Formatter::new(cli.json, cli.quiet, cli.no_color);
    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
    };
    let name = cli.cmd.name();

    let res = match cli.cmd {
        Command::Generate(args) => cmd_generate(args, &overrides, &out),
        Command::Icon(args) => cmd_icon(args, &overrides, &out),
        Command::Pattern(args) => cmd_pattern(args, &overrides, &out),
        Command::Transform(args) => cmd_transform(args, &out),
        Command::Combine(args) => cmd_combine(args, &out),
        Command::Transparent(TransparentCommand::Make(args)) => cmd_transparent_make(args, &out),
        Command::Transparent(TransparentCommand::Inspect(args)) => cmd_inspect(args, &out),
        Command::Version => {
            cmd_version(&out);
            Ok(())
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            out.error(name, ErrorInfo::from(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn require_file(path: &Path) -> NanobananaResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(NanobananaError::FileNotFound(path.to_path_buf()))
    }
}

fn client_for(config: &Config) -> anyhow::Result<GeminiClient> {
    let key = config.require_api_key()?;
    Ok(GeminiClient::new(key, config.model_id(), config.timeout)?)
}

fn cmd_generate(args: GenerateArgs, overrides: &Overrides, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    let prompt = args.prompt.join(" ");
    let config = Config::load(overrides)?;
    let client = client_for(&config)?;

    let image_config = ImageConfig {
        aspect_ratio: args.aspect_ratio.clone(),
        resolution: args.resolution.clone(),
        count: args.count,
    };
    image_config.validate(client.model())?;

    let output = config.output_path(&args.output);
    if args.no_overwrite && output.exists() {
        return Err(NanobananaError::validation(format!(
            "output file already exists: {}",
            output.display()
        ))
        .into());
    }

    out.progress(format!("Generating image with {}...", client.model()));
    out.info(format!("  Prompt: {prompt}"));
    let images = match &args.input {
        Some(input) => {
            require_file(input)?;
            out.progress(format!("Editing image: {}", input.display()));
            client.edit(input, &prompt, &image_config)?
        }
        None => client.generate(&prompt, &image_config)?,
    };

    let (width, height) = estimate_dimensions(&args.aspect_ratio);
    let mut results = Vec::with_capacity(images.len());
    for (i, img) in images.iter().enumerate() {
        let path = if images.len() > 1 {
            numbered_output_path(&output, i + 1)
        } else {
            output.clone()
        };
        img.save(&path)?;
        out.image_saved(&path, width, height);
        results.push(ImageResult::new(&path, width, height, img.format()));
    }

    out.success(
        "generate",
        json!({ "prompt": prompt, "model": client.model(), "images": results }),
        Some(Timing::since(start)),
    );
    Ok(())
}

/// Where the `size`-pixel icon goes for a given `-o` value.
fn icon_output_path(output: &str, size: u32) -> PathBuf {
    if output.contains("{size}") {
        PathBuf::from(output.replace("{size}", &size.to_string()))
    } else {
        Path::new(output).join(format!("icon_{size}.png"))
    }
}

fn cmd_icon(args: IconArgs, overrides: &Overrides, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    let prompt = args.prompt.join(" ");

    if let Some(bad) = args.sizes.iter().find(|s| !(16..=2048).contains(*s)) {
        return Err(NanobananaError::invalid_size(format!(
            "icon size {bad} (must be 16-2048)"
        ))
        .into());
    }
    let style = IconStyle::parse(&args.style)?;

    let config = Config::load(overrides)?;
    let client = client_for(&config)?;

    out.progress(format!("Generating base icon with {}...", client.model()));
    let images = client.generate(
        &build_icon_prompt(&prompt, style, &args.background),
        &ImageConfig::default(),
    )?;
    let base = images.first().ok_or(NanobananaError::NoImageGenerated)?;
    let decoded = image::load_from_memory(&base.data).context("failed to decode generated icon")?;

    let mut results = Vec::with_capacity(args.sizes.len());
    for &size in &args.sizes {
        let path = config.output_path(&icon_output_path(&args.output, size));
        out.progress(format!("Creating {size}x{size} icon..."));

        let req = TransformRequest {
            resize: Some(ResizeSpec::Exact {
                width: size,
                height: size,
            }),
            fit: FitMode::Cover,
            ..Default::default()
        };
        let icon = transform::transform_image(&decoded, &req)?;
        raster::save_rgba(&icon, &path, image::ImageFormat::Png)?;

        out.image_saved(&path, size, size);
        results.push(ImageResult::new(&path, size, size, "png"));
    }

    out.success(
        "icon",
        json!({
            "prompt": prompt,
            "model": client.model(),
            "style": args.style,
            "sizes": args.sizes,
            "images": results,
        }),
        Some(Timing::since(start)),
    );
    Ok(())
}

fn parse_pattern_size(spec: &str) -> NanobananaResult<(u32, u32)> {
    let ResizeSpec::Exact { width, height } = ResizeSpec::parse(spec)? else {
        return Err(NanobananaError::invalid_size(format!(
            "'{spec}', use WxH (e.g. 512x512)"
        )));
    };
    if !(64..=2048).contains(&width) || !(64..=2048).contains(&height) {
        return Err(NanobananaError::invalid_size(
            "pattern size must be between 64 and 2048 pixels",
        ));
    }
    Ok((width, height))
}

fn cmd_pattern(args: PatternArgs, overrides: &Overrides, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    let prompt = args.prompt.join(" ");

    let (width, height) = parse_pattern_size(&args.size)?;
    let kind = PatternType::parse(&args.kind)?;
    let style = PatternStyle::parse(&args.style)?;

    let config = Config::load(overrides)?;
    let client = client_for(&config)?;

    out.progress(format!(
        "Generating {} pattern with {}...",
        kind.as_str(),
        client.model()
    ));
    let image_config = ImageConfig {
        aspect_ratio: snap_aspect_ratio(width, height).to_string(),
        ..Default::default()
    };
    let images = client.generate(&build_pattern_prompt(&prompt, kind, style), &image_config)?;
    let img = images.first().ok_or(NanobananaError::NoImageGenerated)?;

    let output = config.output_path(&args.output);
    img.save(&output)?;
    out.image_saved(&output, width, height);

    out.success(
        "pattern",
        json!({
            "prompt": prompt,
            "model": client.model(),
            "type": kind.as_str(),
            "style": args.style,
            "size": args.size,
            "image": ImageResult::new(&output, width, height, img.format()),
        }),
        Some(Timing::since(start)),
    );
    Ok(())
}

fn cmd_transform(args: TransformArgs, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    require_file(&args.input)?;

    let req = TransformRequest::from_specs(
        args.resize.as_deref(),
        &args.fit,
        args.crop.as_deref(),
        args.rotate,
        args.flip,
        args.flop,
    )?;
    req.validate()?;

    out.progress("Transforming image...");
    let res = transform::transform_file(&args.input, &args.output, &req)?;
    out.image_saved(&args.output, res.width, res.height);

    out.success(
        "transform",
        json!({
            "input": args.input.display().to_string(),
            "output": args.output.display().to_string(),
            "image": ImageResult::new(&args.output, res.width, res.height, res.format),
            "operations": {
                "resize": args.resize.unwrap_or_default(),
                "fit": args.fit,
                "crop": args.crop.unwrap_or_default(),
                "rotate": args.rotate,
                "flip": args.flip,
                "flop": args.flop,
            },
        }),
        Some(Timing::since(start)),
    );
    Ok(())
}

/// Expand glob patterns; arguments that match nothing must be existing
/// files.
fn expand_inputs(args: &[String]) -> NanobananaResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for arg in args {
        let matches = glob::glob(arg)
            .map_err(|e| NanobananaError::validation(format!("invalid glob pattern '{arg}': {e}")))?
            .filter_map(Result::ok)
            .collect::<Vec<_>>();
        if matches.is_empty() {
            let path = PathBuf::from(arg);
            require_file(&path)?;
            paths.push(path);
        } else {
            paths.extend(matches);
        }
    }
    Ok(paths)
}

fn cmd_combine(args: CombineArgs, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    let inputs = expand_inputs(&args.images)?;
    if inputs.len() < 2 {
        return Err(NanobananaError::NotEnoughImages(inputs.len()).into());
    }

    let opts = CombineOptions::from_specs(
        &args.direction,
        args.gap,
        args.columns,
        &args.align,
        &args.background,
    )?;

    out.progress(format!(
        "Combining {} images ({})...",
        inputs.len(),
        args.direction
    ));
    let res = compose::combine_files(&inputs, &args.output, &opts)?;
    out.image_saved(&args.output, res.width, res.height);

    let input_names: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
    out.success(
        "combine",
        json!({
            "inputs": input_names,
            "output": args.output.display().to_string(),
            "image": ImageResult::new(&args.output, res.width, res.height, res.format),
            "options": {
                "direction": args.direction,
                "gap": args.gap,
                "columns": args.columns,
                "align": args.align,
                "background": args.background,
            },
        }),
        Some(Timing::since(start)),
    );
    Ok(())
}

fn cmd_transparent_make(args: TransparentMakeArgs, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    require_file(&args.input)?;

    let output = match (&args.output, args.overwrite) {
        (Some(path), _) => path.clone(),
        (None, true) => args.input.clone(),
        (None, false) => transparency::default_output_path(&args.input),
    };
    let opts = TransparencyOptions::from_specs(&args.color, args.tolerance)?;

    out.progress(format!("Removing {} background...", args.color));
    let res = transparency::make_transparent_file(&args.input, &output, &opts)?;
    out.image_saved(&output, res.width, res.height);

    out.success(
        "transparent make",
        json!({
            "input": args.input.display().to_string(),
            "output": output.display().to_string(),
            "image": ImageResult::new(&output, res.width, res.height, "png"),
            "options": { "color": args.color, "tolerance": args.tolerance },
        }),
        Some(Timing::since(start)),
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs, out: &Formatter) -> anyhow::Result<()> {
    let start = Instant::now();
    require_file(&args.input)?;
    let res = transparency::inspect_file(&args.input)?;

    if out.is_json() {
        out.success(
            "transparent inspect",
            json!({ "input": args.input.display().to_string(), "results": res }),
            Some(Timing::since(start)),
        );
        return Ok(());
    }

    println!("Transparency Analysis: {}", args.input.display());
    println!("  Format:              {}", res.format);
    println!("  Dimensions:          {}x{}", res.width, res.height);
    println!("  Has Alpha Channel:   {}", res.has_alpha_channel);
    println!("  Transparent Pixels:  {:.1}%", res.transparent_pixel_percent);
    println!("  Dominant Background: {}", res.dominant_background_color);
    println!();
    println!("  Recommendation: {}", res.recommendation);
    Ok(())
}

fn cmd_version(out: &Formatter) {
    let version = env!("CARGO_PKG_VERSION");
    if out.is_json() {
        out.success(
            "version",
            json!({
                "version": version,
                "os": std::env::consts::OS,
                "arch": std::env::consts::ARCH,
                "default_model": gemini::MODEL_FLASH,
            }),
            None,
        );
        return;
    }

    println!("nanobanana {version}");
    println!(
        "  platform:   {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!("  model:      {}", gemini::MODEL_FLASH);
}

#[cfg(test)]
#[path = "../../tests/unit/cli/nanobanana.rs"]
mod tests;
