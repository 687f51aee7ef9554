use crate::quotation::types::LineItem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// CAD formats the estimation collaborator accepts. Decoding them is its job,
/// not ours; we only gatekeep on the extension.
pub const SUPPORTED_EXTENSIONS: [&str; 9] = [
    "stl", "step", "stp", "iges", "igs", "sldprt", "obj", "3mf", "ply",
];

pub const PRINT_TYPES: [&str; 3] = ["FDM", "SLA", "SLS"];
pub const MATERIALS: [&str; 5] = ["PLA", "ABS", "PETG", "Nylon", "Resin"];
pub const FINISHES: [&str; 3] = ["Standard", "Smooth", "Painted"];

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VolumeMethod {
    /// Derived from the actual geometry
    Calculated,
    /// Fallback guess when the geometry could not be read
    Estimated,
}

/// One uploaded CAD file as reported by the upload/estimation collaborator.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UploadedFile {
    pub id: Uuid,
    pub file_name: String,
    pub print_type: String,
    pub material: String,
    pub finish: String,
    pub quantity: u32,
    /// Volume of one piece in cubic cm
    pub volume: f64,
    /// Weight of one piece in grams
    pub weight: f64,
    pub volume_method: VolumeMethod,
    pub estimated_cost: f64,
    /// Volume estimation still running; the cost is not usable yet
    #[serde(default)]
    pub is_calculating_volume: bool,
}

impl UploadedFile {
    pub fn is_supported(file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                SUPPORTED_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

/// Flattens uploaded files into calculator line items. A file whose volume is
/// still being calculated contributes zero cost until it resolves.
pub fn line_items(files: &[UploadedFile]) -> Vec<LineItem> {
    files
        .iter()
        .map(|file| LineItem {
            unit_cost: if file.is_calculating_volume {
                0.0
            } else {
                file.estimated_cost
            },
            volume: file.volume,
            quantity: file.quantity,
        })
        .collect()
}
