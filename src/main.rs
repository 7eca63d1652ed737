use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use doping_scatter::app::DopingScatterApp;
use doping_scatter::color::MarkerPalette;
use doping_scatter::config::ChartConfig;
use doping_scatter::data::loader;
use doping_scatter::render::export_svg;
use doping_scatter::state::AppState;
use doping_scatter::ChartScene;
use eframe::egui;

/// Doping in professional bicycle racing: race time vs. year.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Rider dataset (.json or .csv)
    #[arg(default_value = "cyclist-data.json")]
    data: PathBuf,

    /// JSON file overriding chart parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the chart as SVG to this path and exit without opening a window
    #[arg(long, value_name = "FILE")]
    export_svg: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let config = match &cli.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    let palette = MarkerPalette::from_config(&config).context("building marker palette")?;

    if let Some(out) = &cli.export_svg {
        let dataset = loader::load_file(&cli.data)?;
        let scene = ChartScene::build(&dataset, &config, &palette);
        return export_svg(&scene, &dataset, out);
    }

    let (width, height) = (config.width as f32, config.height as f32);
    let mut state = AppState::new(config, palette);
    state.load_path(&cli.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width + 40.0, height + 60.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Doping in Professional Bicycle Racing",
        options,
        Box::new(|_cc| Ok(Box::new(DopingScatterApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
