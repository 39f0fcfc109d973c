//! Structured container serialization for synthesis output.
//!
//! One run produces one zip container with independently deflate-compressed
//! entries, mirroring the geometry tables and file-level attributes of the
//! output contract:
//!
//! - `x_coor` — f64 little-endian array, length N, output-scaled x centers
//! - `y_coor` — f64 little-endian array, length N, output-scaled y centers
//! - `rad` — u16 little-endian array, length N, output-scaled radii
//! - `binary_image` — u8 array, height x width row-major, one byte per pixel
//! - `attributes.json` — the [`ImageAttributes`] record
//!
//! Coordinates and radii are multiplied by the configured output scale at
//! write time only. Writing truncates any existing file at the target path;
//! there is no partial-file cleanup beyond the filesystem's replace
//! semantics.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};
use crate::grid::Circle;
use crate::raster::BinaryImage;

const X_COOR: &str = "x_coor";
const Y_COOR: &str = "y_coor";
const RAD: &str = "rad";
const BINARY_IMAGE: &str = "binary_image";
const ATTRIBUTES: &str = "attributes.json";

/// File-level attributes attached to the container.
///
/// All scalars except `porosity`, `width`, and `height` are in output-scaled
/// units. `width` and `height` describe the `binary_image` table layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttributes {
    pub porosity: f64,
    pub rad: f64,
    pub stride: f64,
    pub offset: f64,
    pub xdevmax: f64,
    pub ydevmax: f64,
    pub raddevmax: f64,
    pub width: usize,
    pub height: usize,
}

/// Everything read back from a container file.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerContents {
    pub x_coor: Vec<f64>,
    pub y_coor: Vec<f64>,
    pub rad: Vec<u16>,
    pub image: BinaryImage,
    pub attributes: ImageAttributes,
}

/// Writes geometry, mask, and attributes to a container at `path`.
///
/// An existing file at the target path is replaced. I/O failures are fatal
/// and surfaced with their underlying cause.
pub fn write_container(
    path: &Path,
    circles: &[Circle],
    image: &BinaryImage,
    attributes: &ImageAttributes,
    output_scale: f64,
) -> Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let x_coor: Vec<f64> = circles
        .iter()
        .map(|c| f64::from(c.center.x) * output_scale)
        .collect();
    let y_coor: Vec<f64> = circles
        .iter()
        .map(|c| f64::from(c.center.y) * output_scale)
        .collect();
    let rad: Vec<u16> = circles
        .iter()
        .map(|c| {
            (f64::from(c.radius) * output_scale)
                .round()
                .clamp(0.0, f64::from(u16::MAX)) as u16
        })
        .collect();

    zip.start_file(X_COOR, options)?;
    zip.write_all(&f64_table_bytes(&x_coor))?;
    zip.start_file(Y_COOR, options)?;
    zip.write_all(&f64_table_bytes(&y_coor))?;
    zip.start_file(RAD, options)?;
    zip.write_all(&u16_table_bytes(&rad))?;
    zip.start_file(BINARY_IMAGE, options)?;
    zip.write_all(&image.data)?;
    zip.start_file(ATTRIBUTES, options)?;
    zip.write_all(&serde_json::to_vec_pretty(attributes)?)?;
    zip.finish()?;

    info!(
        path = %path.display(),
        circles = circles.len(),
        width = image.width,
        height = image.height,
        "container written"
    );
    Ok(())
}

/// Reads a container back into memory, verifying table shapes.
pub fn read_container(path: &Path) -> Result<ContainerContents> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let attributes: ImageAttributes = serde_json::from_slice(&entry_bytes(&mut archive, ATTRIBUTES)?)?;
    let x_coor = f64_table_from_bytes(&entry_bytes(&mut archive, X_COOR)?, X_COOR)?;
    let y_coor = f64_table_from_bytes(&entry_bytes(&mut archive, Y_COOR)?, Y_COOR)?;
    let rad = u16_table_from_bytes(&entry_bytes(&mut archive, RAD)?, RAD)?;

    if x_coor.len() != y_coor.len() || x_coor.len() != rad.len() {
        return Err(Error::Malformed(format!(
            "geometry tables disagree on length: {} x, {} y, {} rad",
            x_coor.len(),
            y_coor.len(),
            rad.len()
        )));
    }

    let data = entry_bytes(&mut archive, BINARY_IMAGE)?;
    if data.len() != attributes.width * attributes.height {
        return Err(Error::Malformed(format!(
            "binary_image has {} bytes, attributes declare {}x{}",
            data.len(),
            attributes.width,
            attributes.height
        )));
    }
    let image = BinaryImage {
        width: attributes.width,
        height: attributes.height,
        data,
    };

    Ok(ContainerContents {
        x_coor,
        y_coor,
        rad,
        image,
        attributes,
    })
}

fn entry_bytes(archive: &mut ZipArchive<File>, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive.by_name(name)?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn f64_table_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn u16_table_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn f64_table_from_bytes(bytes: &[u8], name: &str) -> Result<Vec<f64>> {
    if bytes.len() % 8 != 0 {
        return Err(Error::Malformed(format!(
            "table '{name}' has {} bytes, not a multiple of 8",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect())
}

fn u16_table_from_bytes(bytes: &[u8], name: &str) -> Result<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Malformed(format!(
            "table '{name}' has {} bytes, not a multiple of 2",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|chunk| {
            let mut raw = [0u8; 2];
            raw.copy_from_slice(chunk);
            u16::from_le_bytes(raw)
        })
        .collect())
}
