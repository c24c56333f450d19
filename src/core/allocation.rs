use super::types::{AssetAllocation, EngineError, UserProfile};

// Long-run nominal return assumptions per asset class.
const US_STOCK_RETURN: f64 = 0.10;
const INTERNATIONAL_STOCK_RETURN: f64 = 0.08;
const BOND_RETURN: f64 = 0.04;
const CASH_RETURN: f64 = 0.02;

const SUM_TOLERANCE: f64 = 0.01;

/// Checks the allocation invariants without mutating anything and without
/// panicking; callers that need a hard failure go through
/// [`expected_return`].
pub fn validate_allocation(allocation: &AssetAllocation) -> Result<(), String> {
    let total = allocation.total();
    if (total - 100.0).abs() > SUM_TOLERANCE {
        return Err(format!(
            "allocation percentages must sum to 100, got {total:.1}"
        ));
    }
    for (label, value) in [
        ("usStocks", allocation.us_stocks),
        ("internationalStocks", allocation.international_stocks),
        ("bonds", allocation.bonds),
        ("cash", allocation.cash),
    ] {
        if value < 0.0 {
            return Err(format!(
                "allocation percentages cannot be negative ({label} is {value})"
            ));
        }
    }
    Ok(())
}

/// Percentage-weighted expected nominal return. Revalidates and fails loudly
/// on an invalid allocation; the result is a plain decimal fraction, left
/// unrounded for the presentation layer to format.
pub fn expected_return(allocation: &AssetAllocation) -> Result<f64, EngineError> {
    validate_allocation(allocation).map_err(EngineError::InvalidArgument)?;
    Ok((allocation.us_stocks * US_STOCK_RETURN
        + allocation.international_stocks * INTERNATIONAL_STOCK_RETURN
        + allocation.bonds * BOND_RETURN
        + allocation.cash * CASH_RETURN)
        / 100.0)
}

/// Qualitative label based on the combined stock share. Lower bounds are
/// inclusive, so exactly 80% stocks reads as very aggressive.
pub fn describe_allocation_style(allocation: &AssetAllocation) -> &'static str {
    let stocks = allocation.stock_percentage();
    if stocks >= 80.0 {
        "very aggressive"
    } else if stocks >= 65.0 {
        "aggressive"
    } else if stocks >= 45.0 {
        "balanced"
    } else if stocks >= 25.0 {
        "conservative"
    } else {
        "very conservative"
    }
}

/// Time-horizon heuristic: more years, more stocks. Stocks are split 70/30
/// US/international and rounded independently, cash is set next, and bonds
/// absorb the remainder (floored at zero). The independent roundings mean
/// the four parts are not algebraically forced to sum to 100; keep this
/// order.
pub fn suggest_allocation(years_to_retirement: u32) -> AssetAllocation {
    let years = years_to_retirement as f64;
    let stock_percentage = (40.0 + 2.0 * years).clamp(20.0, 90.0);
    let us_stocks = (stock_percentage * 0.7).round();
    let international_stocks = (stock_percentage * 0.3).round();
    let cash = (15.0 - years).clamp(3.0, 10.0);
    let bonds = (100.0 - us_stocks - international_stocks - cash).max(0.0);
    AssetAllocation {
        us_stocks,
        international_stocks,
        bonds,
        cash,
    }
}

/// Return assumption for a profile: an explicit, valid allocation overrides
/// the risk-tolerance default.
pub fn profile_expected_return(profile: &UserProfile) -> f64 {
    profile
        .asset_allocation
        .as_ref()
        .and_then(|allocation| expected_return(allocation).ok())
        .unwrap_or_else(|| profile.risk_tolerance.expected_annual_return())
}
