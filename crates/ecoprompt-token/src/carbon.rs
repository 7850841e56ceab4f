//! Analytical energy and carbon cost model.
//!
//! A fixed linear formula from token count to energy and emissions. The
//! constants must stay as they are for results to remain comparable with
//! previously stored figures.

use ecoprompt_core::CostEstimate;

/// Floating point operations spent per token.
pub const FLOPS_PER_TOKEN: f64 = 4.0e10;
/// Energy per floating point operation, in joules.
pub const JOULES_PER_FLOP: f64 = 2.5e-11;
/// Grid carbon intensity, grams of CO2 per kWh.
pub const GRID_INTENSITY_G_PER_KWH: f64 = 350.0;

const JOULES_PER_KWH: f64 = 3.6e6;

/// Estimate energy and emissions for processing `token_count` tokens.
pub fn estimate(token_count: usize) -> CostEstimate {
    let flops = token_count as f64 * FLOPS_PER_TOKEN;
    let joules = flops * JOULES_PER_FLOP;
    let kwh = joules / JOULES_PER_KWH;
    let co2_grams = kwh * GRID_INTENSITY_G_PER_KWH;

    CostEstimate { kwh, co2_grams }
}

/// Difference between the cost of `before` and `after` tokens.
///
/// Negative when `after > before`.
pub fn savings(before: usize, after: usize) -> CostEstimate {
    let before = estimate(before);
    let after = estimate(after);

    CostEstimate {
        kwh: before.kwh - after.kwh,
        co2_grams: before.co2_grams - after.co2_grams,
    }
}
