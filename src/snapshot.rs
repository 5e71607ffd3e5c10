use std::path::Path;

use eframe::egui::ColorImage;

use crate::error::{ChartError, Result};

/// Write a captured frame as an RGBA PNG.
pub fn save_png(path: &Path, frame: &ColorImage) -> Result<()> {
    let [width, height] = frame.size;
    let rgba: Vec<u8> = frame.pixels.iter().flat_map(|c| c.to_array()).collect();

    image::save_buffer(
        path,
        &rgba,
        width as u32,
        height as u32,
        image::ColorType::Rgba8,
    )
    .map_err(|source| ChartError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved: {}", path.display());
    Ok(())
}
