use crate::core::params::CalculationParams;
use crate::core::result::CalculationResult;
use crate::core::rounding::{ceil_cents, percent_of, round_cents, round_tenths};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tons to hectoliters: one ton of product fills 0.84 x 1000 liters.
const VOLUMETRIC_FACTOR: Decimal = dec!(0.84);
const TEN: Decimal = dec!(10);

#[derive(Debug, Clone, Copy)]
struct LandedCost {
    per_ton: Decimal,
    per_100l: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct WholesalePrice {
    pre_vat: Decimal,
    with_vat: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct RetailPrice {
    pre_vat: Decimal,
    with_vat: Decimal,
}

/// The regulated price structure.
///
/// Turns a [`CalculationParams`] into a [`CalculationResult`] through five
/// dependent stages: landed cost, subtotal, wholesale, retail, final price.
/// Each stage rounds only the figures it publishes; helper amounts such as
/// VAT are consumed unrounded within their stage.
///
/// The engine holds no state and can be called concurrently.
///
/// # Examples
///
/// ```
/// use fuel_price_engine::core::params::DEFAULT_PARAMS;
/// use fuel_price_engine::pricing::engine::PricingEngine;
/// use rust_decimal_macros::dec;
///
/// let params = DEFAULT_PARAMS
///     .with_commodity_quote(dec!(800))
///     .with_exchange_rate(dec!(9.3));
/// let result = PricingEngine::calculate(&params);
/// assert_eq!(result.final_price, dec!(1067.58));
/// ```
pub struct PricingEngine;

impl PricingEngine {
    /// Run every stage in order. Total over every input: the arithmetic
    /// is exact while intermediates stay within the `Decimal` range (about
    /// ±7.9e28) and saturates at its bounds beyond that, e.g. a quote and
    /// exchange rate of 1e15 each.
    pub fn calculate(params: &CalculationParams) -> CalculationResult {
        let landed = Self::landed_cost(params);
        let subtotal = Self::subtotal(params, landed.per_100l);
        let wholesale = Self::wholesale_price(params, subtotal, landed.per_100l);
        let retail = Self::retail_price(params, &wholesale);

        // Ceiling, not rounding: the pump price never rounds down.
        let final_price = ceil_cents(retail.with_vat);

        CalculationResult {
            cost_per_ton: landed.per_ton,
            cost_per_100l: landed.per_100l,
            subtotal,
            wholesale_pre_vat: wholesale.pre_vat,
            wholesale_with_vat: wholesale.with_vat,
            retail_pre_vat: retail.pre_vat,
            retail_with_vat: retail.with_vat,
            final_price,
        }
    }

    /// Shorthand for `calculate(params).final_price`.
    pub fn final_price(params: &CalculationParams) -> Decimal {
        Self::calculate(params).final_price
    }

    fn landed_cost(p: &CalculationParams) -> LandedCost {
        let quote_local = p.commodity_quote.saturating_mul(p.exchange_rate);
        let freight_local = p.freight.saturating_mul(p.exchange_rate);
        let cif = quote_local.saturating_add(freight_local);

        let approach_fee = p
            .approach_fee_fixed
            .saturating_add(percent_of(p.approach_fee_rate, cif));
        let parafiscal_fee = percent_of(p.parafiscal_tax_rate, cif.saturating_add(p.port_tax));

        let per_ton = round_cents(sum(&[
            quote_local,
            freight_local,
            p.port_tax,
            approach_fee,
            parafiscal_fee,
            p.storage_remuneration,
        ]));
        let per_100l = round_cents(round_tenths(per_ton * VOLUMETRIC_FACTOR) / TEN);

        LandedCost { per_ton, per_100l }
    }

    fn subtotal(p: &CalculationParams, cost_per_100l: Decimal) -> Decimal {
        let vat = percent_of(p.vat_rate, cost_per_100l.saturating_add(p.excise_tax));
        let duty_credit = percent_of(p.duty_credit_rate, p.excise_tax.saturating_add(vat));

        round_cents(sum(&[cost_per_100l, p.excise_tax, vat, duty_credit]))
    }

    fn wholesale_price(p: &CalculationParams, subtotal: Decimal, cost_per_100l: Decimal) -> WholesalePrice {
        // VAT on cost + excise, same base as the subtotal stage.
        let vat = percent_of(p.vat_rate, cost_per_100l.saturating_add(p.excise_tax));

        let pre_vat = round_cents(subtotal.saturating_add(p.distribution_margin).saturating_sub(vat));
        let with_vat = round_cents(percent_of(p.vat_rate, pre_vat).saturating_add(pre_vat));

        WholesalePrice { pre_vat, with_vat }
    }

    fn retail_price(p: &CalculationParams, wholesale: &WholesalePrice) -> RetailPrice {
        let shrinkage = percent_of(p.retailer_shrinkage_rate, wholesale.with_vat);
        let wholesale_vat = percent_of(p.vat_rate, wholesale.pre_vat);

        let pre_vat = round_cents(
            sum(&[wholesale.with_vat, shrinkage, p.thermal_correction, p.retail_margin])
                .saturating_sub(wholesale_vat),
        );
        let retail_vat = percent_of(p.vat_rate, pre_vat);
        let with_vat = round_cents(pre_vat.saturating_add(retail_vat));

        RetailPrice { pre_vat, with_vat }
    }
}

fn sum(values: &[Decimal]) -> Decimal {
    values.iter().fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v))
}
