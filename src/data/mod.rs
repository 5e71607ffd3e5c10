/// Data layer: discovery, titles, loading, and the chart model.
///
/// Architecture:
/// ```text
///   folder
///     │
///     ▼
///   ┌──────────┐
///   │ discover │  latencies_*.csv, sorted → Vec<LatencyFile>
///   └──────────┘
///     │           ┌────────┐
///     │ ─────────▶│ title  │  file name → "service a us east"
///     ▼           └────────┘
///   ┌──────────┐
///   │  loader  │  task_id,latency_ms rows → Vec<LatencyRecord>
///   └──────────┘
///     │
///     ▼
///   ┌──────────────┐
///   │ LatencyChart │  title, [x, y] points, category ticks
///   └──────────────┘
/// ```

pub mod discover;
pub mod loader;
pub mod model;
pub mod title;
