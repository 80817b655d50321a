//! Invoice arithmetic: line totals, subtotal, VAT and grand total.
//!
//! This is the only place the amounts are computed. Invoice creation, the
//! unsaved preview and the printable page all read from here or from values
//! stored by it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// VAT charged on the subtotal (18%).
pub const VAT_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Money is carried to two decimal places.
const MONEY_DP: u32 = 2;

/// Quantities are carried to three decimal places.
const QTY_DP: u32 = 3;

/// Largest quantity a line can hold: 9,999,999,999,999.999.
pub const MAX_QTY: Decimal = Decimal::from_parts(1_874_919_423, 2_328_306, 0, false, 3);

/// Largest unit price or item cost: 9,999,999,999,999.99.
pub const MAX_PRICE: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, 2);

/// Largest line total, subtotal, VAT or invoice total: 9,999,999,999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Unit price at the precision it is stored with.
pub fn round_price(price_per_unit: Decimal) -> Decimal {
    round_money(price_per_unit)
}

/// Quantity at the precision it is stored with.
pub fn round_qty(qty: Decimal) -> Decimal {
    qty.round_dp_with_strategy(QTY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `qty × price_per_unit`, rounded to money precision. `None` when the
/// result does not fit in [`MAX_AMOUNT`].
pub fn line_total(qty: Decimal, price_per_unit: Decimal) -> Option<Decimal> {
    qty.checked_mul(price_per_unit)
        .map(round_money)
        .filter(|total| *total <= MAX_AMOUNT)
}

/// Sum the line totals and derive VAT and the grand total. `None` when any
/// amount does not fit in [`MAX_AMOUNT`].
pub fn compute<I>(line_totals: I) -> Option<InvoiceTotals>
where
    I: IntoIterator<Item = Decimal>,
{
    let subtotal = line_totals
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line))?;
    let vat = round_money(subtotal.checked_mul(VAT_RATE)?);
    let total = subtotal.checked_add(vat)?;

    (total <= MAX_AMOUNT).then_some(InvoiceTotals {
        subtotal,
        vat,
        total,
    })
}

/// Quantity and price both within what a stored line can hold.
pub fn is_within_bounds(qty: Decimal, price_per_unit: Decimal) -> bool {
    qty <= MAX_QTY && price_per_unit <= MAX_PRICE
}

/// A line counts only with a description and a positive quantity and price.
pub fn is_valid_line(particulars: &str, qty: Decimal, price_per_unit: Decimal) -> bool {
    !particulars.trim().is_empty() && qty > Decimal::ZERO && price_per_unit > Decimal::ZERO
}
