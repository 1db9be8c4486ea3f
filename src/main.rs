// src/main.rs
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use openbci_exg::dataset::{load_trial, CsvSource, SubjectIndex, TrialKey};
use openbci_exg::exg::{
    render_session_markers_png, render_start_search_png, PlotStyle, SearchWindow,
    SessionProtocol,
};
use openbci_exg::{load_config, ProcessingConfig};
#[derive(Parser, Debug)]
#[command(name = "openbci-exg", about = "Start-time correction for OpenBCI EXG recordings")]
struct Cli {
    /// JSON processing config; flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}
#[derive(Subcommand, Debug)]
enum Command {
    /// List subjects, sessions and trial files under a recordings root.
    Index {
        root: PathBuf,
    },
    /// Correct the start of one trial.
    Correct(CorrectArgs),
    /// List known board layouts, including those added by the config.
    Boards,
}
#[derive(Args, Debug)]
struct CorrectArgs {
    root: PathBuf,
    #[arg(long)]
    subject: String,
    #[arg(long, default_value = "S1")]
    session: String,
    #[arg(long, default_value_t = 0)]
    day: u32,
    #[arg(long, default_value_t = 0)]
    trial: usize,
    #[arg(long)]
    board: Option<String>,
    /// Explicit EXG column indices, overriding the board layout.
    #[arg(long, value_delimiter = ',')]
    channels: Option<Vec<usize>>,
    #[arg(long)]
    fs: Option<f64>,
    /// Search window in seconds.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    window: Option<Vec<f64>>,
    #[arg(long)]
    slope_len: Option<usize>,
    #[arg(long)]
    threshold: Option<f64>,
    /// Write the start search plot to this PNG.
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Session protocol JSON used for marker plots.
    #[arg(long, requires = "markers_dir")]
    protocol: Option<PathBuf>,
    /// Start of the first movement, in seconds after the corrected start.
    #[arg(long, default_value_t = 0.0)]
    time_start: f64,
    #[arg(long)]
    markers_dir: Option<PathBuf>,
}
impl CorrectArgs {
    fn apply(&self, config: &mut ProcessingConfig) {
        if let Some(board) = &self.board {
            config.board = board.clone();
            config.channels = None;
        }
        if let Some(channels) = &self.channels {
            config.channels = Some(channels.clone());
        }
        if let Some(fs) = self.fs {
            config.sample_rate_hz = fs;
        }
        if let Some(window) = &self.window {
            config.search = SearchWindow::new(window[0], window[1]);
        }
        if let Some(slope_len) = self.slope_len {
            config.slope_len = slope_len;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
    }
}
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProcessingConfig::default(),
    };
    match cli.command {
        Command::Index { root } => run_index(&root, &config),
        Command::Boards => run_boards(&config),
        Command::Correct(args) => {
            args.apply(&mut config);
            run_correct(&args, &config)
        }
    }
}
fn run_index(root: &Path, config: &ProcessingConfig) -> Result<()> {
    let index = SubjectIndex::scan(root, &config.layout)
        .with_context(|| format!("scanning {}", root.display()))?;
    println!("root:     {}", index.root().display());
    println!("subjects: {}", index.subjects().join(", "));
    println!("sessions: {}", index.sessions().join(", "));
    for key in index.keys() {
        println!("{key}");
        for (trial, file) in index.trials(key).unwrap_or_default().iter().enumerate() {
            println!("  [{trial}] {}", file.display());
        }
    }
    Ok(())
}
fn run_boards(config: &ProcessingConfig) -> Result<()> {
    let boards = config.board_table();
    for name in boards.names() {
        let channels = boards.channels_for(name)?;
        println!("{name:<10} columns {channels:?}");
    }
    Ok(())
}
fn run_correct(args: &CorrectArgs, config: &ProcessingConfig) -> Result<()> {
    let index = SubjectIndex::scan(&args.root, &config.layout)
        .with_context(|| format!("scanning {}", args.root.display()))?;
    let key = TrialKey::new(&args.subject, &args.session, args.day);
    let recording = load_trial(&CsvSource::new(config.read.clone()), &index, &key, args.trial)
        .with_context(|| format!("loading {key} trial {}", args.trial))?;
    info!("{key} trial {}: {} samples", args.trial, recording.row_count());
    let processor = config.processor();
    let trial = processor.process(&recording)?;
    let sample_rate = config.sample_rate_hz;
    println!("trial       {key} #{}", args.trial);
    println!("found       {}", trial.correction.found);
    println!(
        "mark        {} ({:.4} s)",
        trial.correction.mark,
        trial.correction.mark_seconds(sample_rate)
    );
    println!("trimmed     {} rows", trial.trimmed_rows);
    println!(
        "duration    {:.3} s -> {:.3} s",
        recording.duration_seconds(sample_rate),
        trial.recording.duration_seconds(sample_rate)
    );
    println!(
        "channels    {} x {}",
        trial.channels.nrows(),
        trial.channels.ncols()
    );
    let style = PlotStyle::default();
    if let Some(path) = &args.plot {
        let clock = recording.clock_fractions()?;
        let png = render_start_search_png(&clock, &processor.search, &trial.correction, &style)?;
        fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
        info!("start search plot written to {}", path.display());
    }
    if let (Some(protocol_path), Some(dir)) = (&args.protocol, &args.markers_dir) {
        let protocol = SessionProtocol::load(protocol_path)
            .with_context(|| format!("loading protocol {}", protocol_path.display()))?;
        let rows: Vec<usize> = (0..trial.channels.nrows()).collect();
        let images = render_session_markers_png(
            &trial.channels,
            &protocol,
            &args.session,
            args.time_start,
            &rows,
            sample_rate,
            &style,
        )?;
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for (row, png) in rows.iter().zip(images) {
            let path = dir.join(format!("{}_{}_ch{row}.png", key.subject, key.session_day()));
            fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
        }
        info!("{} marker plots written to {}", rows.len(), dir.display());
    }
    Ok(())
}
