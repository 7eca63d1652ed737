/// Chart layer: scales, the drawable scene and hover state.
///
/// ```text
///   Dataset + ChartConfig
///        │
///        ▼
///   ┌──────────┐
///   │  scale    │  year → px (linear), MM:SS → px (time)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  scene    │  axes, texts, legend, one Mark per record
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ tooltip   │  pointer → hit test → show / hide
///   └──────────┘
/// ```

pub mod scale;
pub mod scene;
pub mod tooltip;

pub use scene::{ChartScene, Point};
pub use tooltip::{tooltip_text, Tooltip};
