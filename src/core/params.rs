use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Economic inputs of the regulated price structure.
///
/// Amounts are in local currency unless stated otherwise. Every `*_rate`
/// field is a percentage stored as a plain number (`10` means 10%).
///
/// The record is a value: overriding fields yields a new record and leaves
/// the source record untouched.
///
/// # Examples
///
/// ```
/// use fuel_price_engine::core::params::DEFAULT_PARAMS;
/// use rust_decimal_macros::dec;
///
/// let live = DEFAULT_PARAMS
///     .with_commodity_quote(dec!(800))
///     .with_exchange_rate(dec!(9.3));
/// assert_eq!(live.freight, DEFAULT_PARAMS.freight);
/// assert_eq!(DEFAULT_PARAMS.commodity_quote, dec!(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationParams {
    /// International commodity quote, USD per ton.
    #[serde(alias = "cotation")]
    pub commodity_quote: Decimal,
    /// Sea freight, USD per ton.
    #[serde(alias = "fret")]
    pub freight: Decimal,
    /// Local currency units per USD.
    #[serde(alias = "taux")]
    pub exchange_rate: Decimal,
    #[serde(alias = "taxePortuaires")]
    pub port_tax: Decimal,
    #[serde(alias = "fraisApprocheFixe")]
    pub approach_fee_fixed: Decimal,
    /// Variable approach fee, percent of quote + freight in local currency.
    #[serde(alias = "fraisApprocheVariable")]
    pub approach_fee_rate: Decimal,
    /// Percent of quote + freight + port tax.
    #[serde(alias = "taxeParafiscale")]
    pub parafiscal_tax_rate: Decimal,
    #[serde(alias = "remunerationStockage")]
    pub storage_remuneration: Decimal,
    /// Domestic consumption tax, per 100 liters.
    #[serde(alias = "tic")]
    pub excise_tax: Decimal,
    #[serde(alias = "tva")]
    pub vat_rate: Decimal,
    #[serde(alias = "creditDroit")]
    pub duty_credit_rate: Decimal,
    #[serde(alias = "fraisMargeDistribution")]
    pub distribution_margin: Decimal,
    #[serde(alias = "coulageDetaillants")]
    pub retailer_shrinkage_rate: Decimal,
    #[serde(alias = "correctionVariationThermique")]
    pub thermal_correction: Decimal,
    #[serde(alias = "margeDetail")]
    pub retail_margin: Decimal,
}

/// Baseline price structure. Quote and exchange rate are zero and are
/// expected to be supplied from the price feed or by the caller.
pub const DEFAULT_PARAMS: CalculationParams = CalculationParams {
    commodity_quote: dec!(0),
    freight: dec!(15),
    exchange_rate: dec!(0),
    port_tax: dec!(21.04),
    approach_fee_fixed: dec!(16.62),
    approach_fee_rate: dec!(1.8),
    parafiscal_tax_rate: dec!(0.25),
    storage_remuneration: dec!(150),
    excise_tax: dec!(242.2),
    vat_rate: dec!(10),
    duty_credit_rate: dec!(0.41),
    distribution_margin: dec!(28.4),
    retailer_shrinkage_rate: dec!(0.5),
    thermal_correction: dec!(1.5),
    retail_margin: dec!(26.4),
};

impl Default for CalculationParams {
    fn default() -> Self {
        DEFAULT_PARAMS
    }
}

impl CalculationParams {
    /// Return a copy with the commodity quote replaced.
    pub fn with_commodity_quote(mut self, quote: Decimal) -> Self {
        self.commodity_quote = quote;
        self
    }

    /// Return a copy with the exchange rate replaced.
    pub fn with_exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = rate;
        self
    }

    /// Return a new record with every field set in `overrides` replaced.
    pub fn with_overrides(&self, overrides: &ParamsOverride) -> Self {
        let pick = |value: Option<Decimal>, current: Decimal| value.unwrap_or(current);
        Self {
            commodity_quote: pick(overrides.commodity_quote, self.commodity_quote),
            freight: pick(overrides.freight, self.freight),
            exchange_rate: pick(overrides.exchange_rate, self.exchange_rate),
            port_tax: pick(overrides.port_tax, self.port_tax),
            approach_fee_fixed: pick(overrides.approach_fee_fixed, self.approach_fee_fixed),
            approach_fee_rate: pick(overrides.approach_fee_rate, self.approach_fee_rate),
            parafiscal_tax_rate: pick(overrides.parafiscal_tax_rate, self.parafiscal_tax_rate),
            storage_remuneration: pick(overrides.storage_remuneration, self.storage_remuneration),
            excise_tax: pick(overrides.excise_tax, self.excise_tax),
            vat_rate: pick(overrides.vat_rate, self.vat_rate),
            duty_credit_rate: pick(overrides.duty_credit_rate, self.duty_credit_rate),
            distribution_margin: pick(overrides.distribution_margin, self.distribution_margin),
            retailer_shrinkage_rate: pick(
                overrides.retailer_shrinkage_rate,
                self.retailer_shrinkage_rate,
            ),
            thermal_correction: pick(overrides.thermal_correction, self.thermal_correction),
            retail_margin: pick(overrides.retail_margin, self.retail_margin),
        }
    }
}

/// A partial set of parameter values. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsOverride {
    #[serde(alias = "cotation")]
    pub commodity_quote: Option<Decimal>,
    #[serde(alias = "fret")]
    pub freight: Option<Decimal>,
    #[serde(alias = "taux")]
    pub exchange_rate: Option<Decimal>,
    #[serde(alias = "taxePortuaires")]
    pub port_tax: Option<Decimal>,
    #[serde(alias = "fraisApprocheFixe")]
    pub approach_fee_fixed: Option<Decimal>,
    #[serde(alias = "fraisApprocheVariable")]
    pub approach_fee_rate: Option<Decimal>,
    #[serde(alias = "taxeParafiscale")]
    pub parafiscal_tax_rate: Option<Decimal>,
    #[serde(alias = "remunerationStockage")]
    pub storage_remuneration: Option<Decimal>,
    #[serde(alias = "tic")]
    pub excise_tax: Option<Decimal>,
    #[serde(alias = "tva")]
    pub vat_rate: Option<Decimal>,
    #[serde(alias = "creditDroit")]
    pub duty_credit_rate: Option<Decimal>,
    #[serde(alias = "fraisMargeDistribution")]
    pub distribution_margin: Option<Decimal>,
    #[serde(alias = "coulageDetaillants")]
    pub retailer_shrinkage_rate: Option<Decimal>,
    #[serde(alias = "correctionVariationThermique")]
    pub thermal_correction: Option<Decimal>,
    #[serde(alias = "margeDetail")]
    pub retail_margin: Option<Decimal>,
}

impl ParamsOverride {
    /// Override of the two market-driven inputs.
    pub fn market(commodity_quote: Decimal, exchange_rate: Decimal) -> Self {
        Self {
            commodity_quote: Some(commodity_quote),
            exchange_rate: Some(exchange_rate),
            ..Default::default()
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
