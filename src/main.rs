mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, EngineArg};
use sceneprep::config::{self, Config};
use sceneprep::{bootstrap, detect, metadata, review, rip};
use sceneprep_av::{
    check_tools, split_with_extractor, split_with_remuxer, FfmpegExtractor, FfprobeProber,
    MkvmergeRemuxer,
};
use sceneprep_scenes::load_scene_table;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise use defaults based on the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "sceneprep=debug,sceneprep_scenes=debug,sceneprep_av=debug".to_string()
        } else {
            "sceneprep=info,sceneprep_scenes=info,sceneprep_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => run_init(&config, cli.config.as_deref()),
        Commands::Rip {
            disc,
            minlength,
            out,
        } => rip::rip_disc(&out.unwrap_or_else(|| config.sources_dir()), &disc, minlength),
        Commands::Detect {
            input,
            outdir,
            mode,
            threshold,
        } => run_detect(&config, &input, outdir, mode, threshold),
        Commands::Split {
            input,
            csv,
            outdir,
            engine,
            copy,
        } => run_split(&config, &input, &csv, &outdir, engine, copy),
        Commands::Review {
            clips_dir,
            review_root,
        } => run_review(&config, &clips_dir, review_root),
        Commands::Metadata { clips_root, out } => run_metadata(&config, clips_root, out),
        Commands::CheckTools => run_check_tools(),
    }
}

fn run_init(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| Path::new("sceneprep.toml"));
    bootstrap::init_workspace(&config.paths.data_root, config_path)?;
    println!("Workspace ready under {:?}", config.paths.data_root);
    Ok(())
}

fn run_detect(
    config: &Config,
    input: &Path,
    outdir: Option<PathBuf>,
    mode: detect::DetectMode,
    threshold: Option<u32>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("input file does not exist: {:?}", input);
    }

    let outdir = detect::detect_scenes(input, outdir, mode, threshold, &config.scenedetect_dir())?;
    println!("Scene table written to {:?}", outdir);
    Ok(())
}

fn run_split(
    config: &Config,
    input: &Path,
    csv: &Path,
    outdir: &Path,
    engine: EngineArg,
    copy: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("input file does not exist: {:?}", input);
    }

    let table = load_scene_table(csv, &config.scene_table.retry_policy())?;
    println!("Loaded {} scenes from {:?}", table.len(), csv);

    let clips = match engine {
        EngineArg::Mkvmerge => {
            let remuxer = MkvmergeRemuxer::new()?;
            split_with_remuxer(&remuxer, &table, input, outdir)?
        }
        EngineArg::Ffmpeg => {
            let extractor = FfmpegExtractor::new()?;
            split_with_extractor(&extractor, &table, input, outdir, copy)?
        }
    };

    println!("Wrote {} clips to {:?}", clips.len(), outdir);
    Ok(())
}

fn run_review(config: &Config, clips_dir: &Path, review_root: Option<PathBuf>) -> Result<()> {
    if !clips_dir.is_dir() {
        anyhow::bail!("clips directory does not exist: {:?}", clips_dir);
    }

    let prober = FfprobeProber::new()?;
    let review_root = review_root.unwrap_or_else(|| config.review_root());
    let base = review::stage_review(&prober, clips_dir, &review_root)?;

    println!("Review ready: {:?}", base);
    Ok(())
}

fn run_metadata(config: &Config, clips_root: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let clips_root = clips_root.unwrap_or_else(|| config.clips_dir());
    let out = out.unwrap_or_else(|| config.paths.data_root.join("clips_metadata.csv"));

    let prober = FfprobeProber::new()?;
    let count = metadata::build_metadata(&prober, &clips_root, &out)?;

    println!("Wrote {count} rows to {:?}", out);
    Ok(())
}

fn run_check_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "ok"
        } else {
            all_ok = false;
            "missing"
        };

        print!("[{status}] {}", tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({version})");
        }
        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }
        println!();
    }

    println!();
    if all_ok {
        println!("All tools are available.");
    } else {
        println!("Some tools are missing; the pipeline stages that need them will fail.");
    }

    Ok(())
}
