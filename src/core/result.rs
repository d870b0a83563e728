use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every published figure of one price computation.
///
/// Per-ton figures are in local currency per ton; every other figure is in
/// local currency per 100 liters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Landed cost per ton (prix de reprise).
    pub cost_per_ton: Decimal,
    /// Landed cost per 100 liters.
    pub cost_per_100l: Decimal,
    /// Cost plus excise, VAT and duty credit.
    pub subtotal: Decimal,
    pub wholesale_pre_vat: Decimal,
    pub wholesale_with_vat: Decimal,
    pub retail_pre_vat: Decimal,
    pub retail_with_vat: Decimal,
    /// Consumer price, ceiling of `retail_with_vat` to the cent.
    pub final_price: Decimal,
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Price Structure ===")?;
        writeln!(f, "Cost per ton:          {}", self.cost_per_ton)?;
        writeln!(f, "Cost per 100 L:        {}", self.cost_per_100l)?;
        writeln!(f, "Subtotal:              {}", self.subtotal)?;
        writeln!(f, "Wholesale (excl. VAT): {}", self.wholesale_pre_vat)?;
        writeln!(f, "Wholesale (incl. VAT): {}", self.wholesale_with_vat)?;
        writeln!(f, "Retail (excl. VAT):    {}", self.retail_pre_vat)?;
        writeln!(f, "Retail (incl. VAT):    {}", self.retail_with_vat)?;
        writeln!(f, "Final price:           {}", self.final_price)
    }
}
