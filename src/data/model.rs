use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::title::derive_title;

// ---------------------------------------------------------------------------
// TaskId – the first column of a latency file
// ---------------------------------------------------------------------------

/// A dynamically-typed task identifier.  The column is not validated, so any
/// scalar is accepted and typed by the first parse that succeeds.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskId {
    Integer(i64),
    Float(f64),
    Label(String),
}

impl TaskId {
    /// Guess the type of a raw CSV cell: integer, then float, then text.
    pub fn guess(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            return TaskId::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return TaskId::Float(f);
        }
        TaskId::Label(s.to_string())
    }

    /// Numeric position on the x axis, if the id is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TaskId::Integer(i) => Some(*i as f64),
            TaskId::Float(v) => Some(*v),
            TaskId::Label(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// LatencyRecord – one row of a latency file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LatencyRecord {
    pub task_id: TaskId,
    /// The task id cell exactly as written (trimmed), e.g. `007`.
    pub task_text: String,
    pub latency_ms: f64,
}

impl LatencyRecord {
    pub fn new(task_text: &str, latency_ms: f64) -> Self {
        Self {
            task_id: TaskId::guess(task_text),
            task_text: task_text.to_string(),
            latency_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// LatencyFile – a discovered `latencies_*.csv`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LatencyFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Human-readable name derived from `file_name`.
    pub title: String,
}

impl LatencyFile {
    pub fn new(folder: &Path, file_name: &str) -> Self {
        Self {
            path: folder.join(file_name),
            file_name: file_name.to_string(),
            title: derive_title(file_name),
        }
    }

    /// Where an opt-in PNG snapshot of this file's chart is written:
    /// next to the CSV, with `.csv` replaced by `.png`.
    pub fn image_path(&self) -> PathBuf {
        self.path.with_file_name(self.file_name.replace(".csv", ".png"))
    }
}

// ---------------------------------------------------------------------------
// LatencyChart – everything the plot needs for one file
// ---------------------------------------------------------------------------

pub const CHART_TITLE_PREFIX: &str = "Latency per Task - ";
pub const X_AXIS_LABEL: &str = "Task ID";
pub const Y_AXIS_LABEL: &str = "Latency (ms)";

/// Render model of a single latency chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyChart {
    pub title: String,
    /// `[x, y]` in record order (not sorted by x).
    pub points: Vec<[f64; 2]>,
    /// Distinct tick labels when the x axis is categorical, indexed by position.
    pub x_categories: Option<Vec<String>>,
}

impl LatencyChart {
    /// Build the chart for `title` from records in file order.
    ///
    /// When every task id is numeric it is used directly as x.  A single text
    /// id switches the whole axis to categories: each distinct id text gets
    /// the next position in order of first appearance, and repeated ids share
    /// their position.
    pub fn new(title: &str, records: &[LatencyRecord]) -> Self {
        let numeric_x: Option<Vec<f64>> = records.iter().map(|r| r.task_id.as_f64()).collect();

        let (xs, x_categories) = match numeric_x {
            Some(xs) => (xs, None),
            None => {
                let (xs, categories) = categorical_positions(records);
                (xs, Some(categories))
            }
        };

        let points = xs
            .into_iter()
            .zip(records.iter())
            .map(|(x, r)| [x, r.latency_ms])
            .collect();

        LatencyChart {
            title: format!("{CHART_TITLE_PREFIX}{title}"),
            points,
            x_categories,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub fn x_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[0]).collect()
    }

    #[cfg(test)]
    pub fn y_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[1]).collect()
    }

    /// Tight data extent `(min, max)` over finite points, `None` if there are none.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut finite = self
            .points
            .iter()
            .filter(|p| p[0].is_finite() && p[1].is_finite());
        let first = *finite.next()?;
        Some(finite.fold((first, first), |(min, max), p| {
            (
                [min[0].min(p[0]), min[1].min(p[1])],
                [max[0].max(p[0]), max[1].max(p[1])],
            )
        }))
    }

    /// Tick label for a categorical x value; `None` between categories or
    /// when the axis is numeric.
    #[cfg(test)]
    pub fn category_label(&self, x: f64) -> Option<&str> {
        category_at(self.x_categories.as_deref()?, x)
    }
}

/// Map id texts to category positions, first appearance first.
fn categorical_positions(records: &[LatencyRecord]) -> (Vec<f64>, Vec<String>) {
    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut categories = Vec::new();

    let xs = records
        .iter()
        .map(|r| {
            let idx = *positions.entry(r.task_text.as_str()).or_insert_with(|| {
                categories.push(r.task_text.clone());
                categories.len() - 1
            });
            idx as f64
        })
        .collect();

    (xs, categories)
}

/// Grid marks closer than this to a category position still get its label.
const CATEGORY_TOLERANCE: f64 = 1e-6;

/// Label of the category at position `x`, allowing for floating point noise
/// in grid mark values (`7.000000000000001`).
pub fn category_at(categories: &[String], x: f64) -> Option<&str> {
    let nearest = x.round();
    if nearest < 0.0 || (x - nearest).abs() > CATEGORY_TOLERANCE {
        return None;
    }
    categories.get(nearest as usize).map(String::as_str)
}
