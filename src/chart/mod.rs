pub mod recording;
pub mod renderer;
pub mod style;
pub mod surface;

pub use self::recording::RecordingSurface;
pub use self::renderer::ChartRenderer;
pub use self::surface::{ChartOptions, ChartSurface, SeriesData, SeriesId, SeriesKind};
