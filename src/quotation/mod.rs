pub mod types;

pub use types::{
    ChargeConfig, DiscountSettings, LineItem, QuotationBreakdown, VolumeTier,
};

/// Fraction of the next slab's threshold at which the near-slab advisory kicks in.
const NEAR_SLAB_THRESHOLD: f64 = 0.7;

/// Compute the full quotation breakdown from line items and configuration.
///
/// Pure function of its inputs: no I/O, deterministic, never fails. Malformed
/// configuration degrades to zero/disabled amounts instead of erroring, so the
/// caller always gets a breakdown to display.
pub fn compute(
    line_items: &[LineItem],
    discount: &DiscountSettings,
    volume_tiers: &[VolumeTier],
    charges: &ChargeConfig,
) -> QuotationBreakdown {
    let subtotal: f64 = line_items.iter().map(|item| item.unit_cost).sum();
    let total_volume: f64 = line_items
        .iter()
        .map(|item| item.volume * item.quantity as f64)
        .sum();

    let (volume_discount_percent, applied_volume_discount_label) =
        select_volume_tier(volume_tiers, total_volume);
    let near_slab_message = near_slab_advisory(volume_tiers, total_volume);

    let regular_discount_amount = if discount.enabled {
        subtotal * discount.percentage / 100.0
    } else {
        0.0
    };
    // both discounts apply to the subtotal, they never compound
    let volume_discount_amount = subtotal * volume_discount_percent / 100.0;
    let total_discount_amount = regular_discount_amount + volume_discount_amount;
    let amount_after_discount = subtotal - total_discount_amount;

    // IGST, when set, replaces the CGST/SGST split entirely
    let (cgst_amount, sgst_amount, igst_amount) = if charges.igst_percent > 0.0 {
        (0.0, 0.0, amount_after_discount * charges.igst_percent / 100.0)
    } else {
        (
            amount_after_discount * charges.cgst_percent / 100.0,
            amount_after_discount * charges.sgst_percent / 100.0,
            0.0,
        )
    };
    let total_tax = cgst_amount + sgst_amount + igst_amount;
    let amount_after_tax = amount_after_discount + total_tax;

    // face values are always reported; they count towards the total only when enabled
    let (packaging_contribution, courier_contribution) = if charges.additional_charges_enabled {
        (charges.packaging_charge, charges.courier_charge)
    } else {
        (0.0, 0.0)
    };
    let grand_total = amount_after_tax + packaging_contribution + courier_contribution;

    QuotationBreakdown {
        subtotal,
        regular_discount_amount,
        volume_discount_amount,
        applied_volume_discount_label,
        total_discount_amount,
        amount_after_discount,
        cgst_amount,
        sgst_amount,
        igst_amount,
        total_tax,
        amount_after_tax,
        packaging_charge: charges.packaging_charge,
        courier_charge: charges.courier_charge,
        grand_total,
        total_volume,
        near_slab_message,
    }
}

/// Highest qualifying floor wins: the tier with the greatest `min_volume` not
/// exceeding `total_volume`. Tiers sharing a `min_volume` are broken by the
/// larger discount.
fn select_volume_tier(tiers: &[VolumeTier], total_volume: f64) -> (f64, String) {
    let mut sorted: Vec<&VolumeTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| {
        b.min_volume
            .total_cmp(&a.min_volume)
            .then(b.discount_percent.total_cmp(&a.discount_percent))
    });
    for tier in sorted {
        if total_volume >= tier.min_volume {
            let label = format!("{}% ({})", tier.discount_percent, tier.label);
            return (tier.discount_percent, label);
        }
    }
    (0.0, String::new())
}

/// Advisory for the nearest unreached tier only; shown when the order already
/// covers 70% of that tier's threshold. Farther tiers never produce a message.
fn near_slab_advisory(tiers: &[VolumeTier], total_volume: f64) -> String {
    let mut sorted: Vec<&VolumeTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| a.min_volume.total_cmp(&b.min_volume));
    for tier in sorted {
        if total_volume < tier.min_volume {
            if total_volume >= tier.min_volume * NEAR_SLAB_THRESHOLD {
                let remaining = tier.min_volume - total_volume;
                return format!(
                    "To get {}% extra discount ({}), add {:.0} cm³ more volume.",
                    tier.discount_percent, tier.label, remaining
                );
            }
            break;
        }
    }
    String::new()
}
