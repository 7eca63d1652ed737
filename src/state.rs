use std::path::{Path, PathBuf};

use crate::chart::{ChartScene, Tooltip};
use crate::color::MarkerPalette;
use crate::config::ChartConfig;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ChartConfig,

    pub palette: MarkerPalette,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Scene built from `dataset`; rebuilt only when the dataset changes.
    pub scene: Option<ChartScene>,

    /// The single hover overlay.
    pub tooltip: Tooltip,

    /// Where the current dataset came from, shown in the top bar.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ChartConfig, palette: MarkerPalette) -> Self {
        Self {
            tooltip: Tooltip::new(config.tooltip_opacity),
            config,
            palette,
            dataset: None,
            scene: None,
            source: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and lay out the chart.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<&Path>) {
        self.scene = Some(ChartScene::build(&dataset, &self.config, &self.palette));
        self.dataset = Some(dataset);
        self.source = source.map(Path::to_path_buf);
        self.tooltip.hide();
        self.status_message = None;
    }

    /// Record a load failure. Any previous chart is cleared so the error
    /// state is what the user sees.
    pub fn set_load_error(&mut self, message: String) {
        self.dataset = None;
        self.scene = None;
        self.source = None;
        self.tooltip.hide();
        self.status_message = Some(message);
    }

    /// File name of the loaded dataset, for display.
    pub fn source_name(&self) -> Option<String> {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Load `path` and either show its chart or the error.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} riders from {}", dataset.len(), path.display());
                self.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.set_load_error(format!("Error: {e:#}"));
            }
        }
    }
}
