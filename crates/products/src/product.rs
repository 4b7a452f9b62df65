use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use invoicekit_core::{DomainError, DomainResult, ValueObject};

/// Catalogue kind of a product.
///
/// Kinds differ only in the constants fed to the pricing formula, so they are
/// plain data rather than separate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// No tax.
    TaxFree,
    /// Reduced 8% rate.
    Dairy,
    /// Default 23% rate.
    Other,
    /// No tax, flat 5.56 excise per unit.
    Fuel,
}

impl ProductKind {
    /// Tax rate as a fraction (0.08 = 8%).
    pub fn tax_percent(self) -> Decimal {
        match self {
            ProductKind::TaxFree | ProductKind::Fuel => Decimal::ZERO,
            ProductKind::Dairy => dec!(0.08),
            ProductKind::Other => dec!(0.23),
        }
    }

    /// Flat untaxed surcharge per unit.
    pub fn excise(self) -> Decimal {
        match self {
            ProductKind::Fuel => dec!(5.56),
            _ => Decimal::ZERO,
        }
    }
}

/// A sellable item: name, net unit price, tax rate and excise.
///
/// Immutable once constructed. All amounts are exact decimals and derived
/// prices are never rounded, so `0.01 * 1.23` stays `0.0123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Product {
    name: String,
    price: Decimal,
    tax_percent: Decimal,
    excise: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ProductKind>,
}

impl ValueObject for Product {}

impl Product {
    /// Build a product with explicit rates.
    ///
    /// Rejects an empty name, any negative amount and amounts whose taxed
    /// price does not fit a decimal with [`DomainError::InvalidProduct`].
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        tax_percent: Decimal,
        excise: Decimal,
    ) -> DomainResult<Self> {
        Self::build(name.into(), price, tax_percent, excise, None)
    }

    /// Build a product using the rates of a catalogue kind.
    pub fn of_kind(kind: ProductKind, name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        Self::build(name.into(), price, kind.tax_percent(), kind.excise(), Some(kind))
    }

    pub fn tax_free(name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        Self::of_kind(ProductKind::TaxFree, name, price)
    }

    pub fn dairy(name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        Self::of_kind(ProductKind::Dairy, name, price)
    }

    pub fn other(name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        Self::of_kind(ProductKind::Other, name, price)
    }

    pub fn fuel(name: impl Into<String>, price: Decimal) -> DomainResult<Self> {
        Self::of_kind(ProductKind::Fuel, name, price)
    }

    fn build(
        name: String,
        price: Decimal,
        tax_percent: Decimal,
        excise: Decimal,
        kind: Option<ProductKind>,
    ) -> DomainResult<Self> {
        if name.is_empty() {
            return Err(DomainError::invalid_product("name cannot be empty"));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::invalid_product("price cannot be negative"));
        }
        if tax_percent < Decimal::ZERO {
            return Err(DomainError::invalid_product("tax cannot be negative"));
        }
        if excise < Decimal::ZERO {
            return Err(DomainError::invalid_product("excise cannot be negative"));
        }
        let representable = Decimal::ONE
            .checked_add(tax_percent)
            .and_then(|factor| price.checked_mul(factor))
            .and_then(|taxed| taxed.checked_add(excise))
            .is_some();
        if !representable {
            return Err(DomainError::invalid_product("price with tax out of range"));
        }

        Ok(Self {
            name,
            price,
            tax_percent,
            excise,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Net (tax-exclusive) unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }

    pub fn excise(&self) -> Decimal {
        self.excise
    }

    /// Catalogue kind, or `None` for products built with explicit rates.
    pub fn kind(&self) -> Option<ProductKind> {
        self.kind
    }

    /// `price * (1 + tax_percent)`, unrounded.
    pub fn price_with_tax(&self) -> Decimal {
        self.price * (Decimal::ONE + self.tax_percent)
    }

    /// Taxed price plus the (untaxed) excise.
    pub fn price_with_tax_and_excise(&self) -> Decimal {
        self.price_with_tax() + self.excise
    }
}
