use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single priced line produced by the upload/estimation collaborator.
/// The calculator only reads these.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct LineItem {
    /// Estimated cost for this line, already multiplied out by the estimator
    pub unit_cost: f64,
    /// Volume of one piece in cubic cm
    pub volume: f64,
    /// Number of pieces ordered
    pub quantity: u32,
}

/// Flat percentage discount applied on the subtotal when enabled.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct DiscountSettings {
    #[serde(default)]
    pub enabled: bool,
    /// in percentage eg. 10.0 means 10%
    #[serde(default)]
    pub percentage: f64,
}

/// One slab of the volume discount table. Reaching `min_volume` total cubic cm
/// unlocks `discount_percent` on the subtotal.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct VolumeTier {
    pub min_volume: f64,
    /// in percentage eg. 10.0 means 10%
    pub discount_percent: f64,
    pub label: String,
}

/// Tax rates and fixed charges for one quotation.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ChargeConfig {
    /// in percentage, applied together with SGST when IGST is zero
    #[serde(default)]
    pub cgst_percent: f64,
    /// in percentage, applied together with CGST when IGST is zero
    #[serde(default)]
    pub sgst_percent: f64,
    /// in percentage, overrides CGST/SGST when greater than zero
    #[serde(default)]
    pub igst_percent: f64,
    /// fixed amount
    #[serde(default)]
    pub packaging_charge: f64,
    /// fixed amount
    #[serde(default)]
    pub courier_charge: f64,
    /// when false the fixed charges are shown but not added to the total
    #[serde(default = "default_charges_enabled")]
    pub additional_charges_enabled: bool,
}

fn default_charges_enabled() -> bool {
    true
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            cgst_percent: 9.0,
            sgst_percent: 9.0,
            igst_percent: 0.0,
            packaging_charge: 50.0,
            courier_charge: 100.0,
            additional_charges_enabled: true,
        }
    }
}

/// Full priced breakdown, recomputed from scratch on every input change.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct QuotationBreakdown {
    pub subtotal: f64,
    pub regular_discount_amount: f64,
    pub volume_discount_amount: f64,
    /// eg. "10% (Bulk)", empty when no tier qualified
    pub applied_volume_discount_label: String,
    pub total_discount_amount: f64,
    pub amount_after_discount: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub igst_amount: f64,
    pub total_tax: f64,
    pub amount_after_tax: f64,
    /// configured face value, shown even when the charge does not count
    pub packaging_charge: f64,
    /// configured face value, shown even when the charge does not count
    pub courier_charge: f64,
    pub grand_total: f64,
    /// total cubic cm across all files, quantity included
    pub total_volume: f64,
    /// advisory shown when within 70% of the next unreached tier, else empty
    pub near_slab_message: String,
}

impl QuotationBreakdown {
    /// Grand total for display. The stored value keeps full precision,
    /// only the displayed one rounds to the nearest currency unit.
    pub fn rounded_grand_total(&self) -> f64 {
        self.grand_total.round()
    }
}
