use anyhow::{Context, Result};
use eframe::egui;

use crate::cli::Cli;
use crate::data::discover::discover_latency_files;
use crate::data::loader::load_latency_file;
use crate::data::model::LatencyChart;
use crate::state::{ChartState, Snapshot};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Run loop: one chart per file, strictly in order
// ---------------------------------------------------------------------------

/// Discover the latency files in `cli.folder` and hand one chart at a time
/// to `present`, which must not return until the chart is dismissed.
///
/// The first error (unreadable folder, malformed row, failed window) ends
/// the run.  Returns the number of charts presented.
pub fn run<F>(cli: &Cli, mut present: F) -> Result<usize>
where
    F: FnMut(ChartState) -> Result<()>,
{
    let files = discover_latency_files(&cli.folder)
        .with_context(|| format!("scanning {}", cli.folder.display()))?;

    if files.is_empty() {
        log::info!("No latencies_*.csv files in {}", cli.folder.display());
        return Ok(0);
    }
    log::info!("Found {} latency files in {}", files.len(), cli.folder.display());

    let total = files.len();
    for (idx, file) in files.into_iter().enumerate() {
        let records = load_latency_file(&file.path)
            .with_context(|| format!("loading {}", file.file_name))?;
        log::info!("Loaded {} records from {}", records.len(), file.file_name);

        let chart = LatencyChart::new(&file.title, &records);
        present(ChartState::new(file, chart, idx + 1, total, cli.save_png))?;
    }

    Ok(total)
}

// ---------------------------------------------------------------------------
// Native window
// ---------------------------------------------------------------------------

/// Open a window for one chart and block until the user closes it.
pub fn show_chart(state: ChartState) -> Result<()> {
    let title = state.chart.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1200.0, 600.0])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LatencyChartApp { state }))),
    )
    .map_err(|e| anyhow::anyhow!("chart window for '{title}' failed: {e}"))
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LatencyChartApp {
    pub state: ChartState,
}

impl LatencyChartApp {
    /// Pick up a screenshot delivered for a previous request.
    fn collect_snapshot(&mut self, ctx: &egui::Context) {
        if self.state.snapshot != Snapshot::Requested {
            return;
        }
        let captured = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(image) = captured {
            self.state.store_snapshot(&image);
        }
    }
}

impl eframe::App for LatencyChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_snapshot(ctx);

        // ---- Top panel: file, progress, next ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::latency_plot(ui, &self.state);
        });

        if self.state.wants_snapshot() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.state.snapshot = Snapshot::Requested;
        } else if self.state.snapshot == Snapshot::Pending {
            ctx.request_repaint();
        }

        self.state.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn cli(folder: &Path) -> Cli {
        Cli {
            folder: folder.to_path_buf(),
            save_png: false,
        }
    }

    fn write(dir: &Path, name: &str, text: &str) {
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn presents_one_chart_per_file_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latencies_service_a__us_east.csv", "1,10.5\n2,12.0\n3,9.8\n");
        write(dir.path(), "latencies_b.csv", "0,1\n");
        write(dir.path(), "other_data.csv", "not,a,latency,file\n");

        let mut shown = Vec::new();
        let count = run(&cli(dir.path()), |state| {
            shown.push(state);
            Ok(())
        })
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(shown[0].file.file_name, "latencies_b.csv");
        assert_eq!((shown[0].position, shown[0].total), (1, 2));

        let scenario = &shown[1];
        assert_eq!(scenario.chart.title, "Latency per Task - service a us east");
        assert_eq!(scenario.chart.x_values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(scenario.chart.y_values(), vec![10.5, 12.0, 9.8]);
        assert_eq!(scenario.snapshot, Snapshot::Disabled);
    }

    #[test]
    fn empty_folder_presents_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let count = run(&cli(dir.path()), |_| panic!("no chart expected")).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn bad_row_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latencies_a.csv", "1,2.0\n5,not_a_number\n");
        write(dir.path(), "latencies_b.csv", "1,2.0\n");

        let mut presented = 0;
        let err = run(&cli(dir.path()), |_| {
            presented += 1;
            Ok(())
        })
        .unwrap_err();

        assert_eq!(presented, 0);
        assert!(matches!(
            err.downcast_ref::<ChartError>(),
            Some(ChartError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn missing_folder_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&cli(&dir.path().join("missing")), |_| Ok(())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChartError>(),
            Some(ChartError::Filesystem { .. })
        ));
    }

    #[test]
    fn window_failure_stops_later_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latencies_a.csv", "1,2.0\n");
        write(dir.path(), "latencies_b.csv", "1,2.0\n");

        let mut calls = 0;
        let result = run(&cli(dir.path()), |_| {
            calls += 1;
            anyhow::bail!("no display")
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn save_flag_arms_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "latencies_a.csv", "1,2.0\n");
        let cli = Cli {
            folder: dir.path().to_path_buf(),
            save_png: true,
        };

        run(&cli, |state| {
            assert_eq!(state.snapshot, Snapshot::Pending);
            Ok(())
        })
        .unwrap();
    }
}
