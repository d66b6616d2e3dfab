use serde::{Deserialize, Serialize};

/// One building-material line in a calculation request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalcLine {
    /// Identifier of the EPD record, e.g. `"concrete_c16_20"`.
    pub epd_id: String,
    /// Quantity in `input_unit`; the service rejects non-positive values.
    pub input_qty: f64,
    /// Unit of `input_qty`, e.g. `"m3"`, `"m2"`, `"kg"`.
    pub input_unit: String,
    /// Density override in kg/m³; falls back to the EPD record's density.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
    /// Layer thickness in millimetres, for area-based inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

impl CalcLine {
    /// Builds a line with no density or thickness overrides.
    pub fn new(epd_id: impl Into<String>, input_qty: f64, input_unit: impl Into<String>) -> Self {
        Self {
            epd_id: epd_id.into(),
            input_qty,
            input_unit: input_unit.into(),
            density_kg_m3: None,
            thickness_mm: None,
        }
    }
}

/// Request body for `POST /calculate`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalcRequest {
    pub lines: Vec<CalcLine>,
}

impl CalcRequest {
    pub fn new(lines: impl Into<Vec<CalcLine>>) -> Self {
        Self {
            lines: lines.into(),
        }
    }
}

/// Per-material result line of a calculation.
///
/// Only `material_name` and `gwp_a1a3_total` are guaranteed by the service;
/// the remaining fields default when a deployment omits them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CalcResultLine {
    pub material_name: String,
    /// Total A1–A3 global-warming potential for this line, kg CO₂e.
    pub gwp_a1a3_total: f64,
    #[serde(default)]
    pub epd_id: String,
    #[serde(default)]
    pub input_qty: f64,
    #[serde(default)]
    pub input_unit: String,
    /// Quantity converted into the EPD's declared unit.
    #[serde(default)]
    pub declared_qty: f64,
    #[serde(default)]
    pub declared_unit: String,
    #[serde(default)]
    pub gwp_a1a3_per_decl_unit: f64,
    /// `"valid"`, `"expired"` or `"unknown"`.
    #[serde(default)]
    pub epd_valid: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Response body of `POST /calculate`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CalcResult {
    /// Total A1–A3 global-warming potential across all lines, kg CO₂e.
    pub sum_gwp_a1a3: f64,
    pub lines: Vec<CalcResultLine>,
    /// Unit-conversion warnings aggregated across lines.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// One entry of the EPD catalogue returned by `GET /epd`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EpdSummary {
    pub id: String,
    pub name: String,
    pub declared_unit: String,
    pub gwp_a1a3_per_decl_unit: f64,
    /// `"valid"`, `"expired"` or `"unknown"`.
    #[serde(default)]
    pub valid: Option<String>,
}
