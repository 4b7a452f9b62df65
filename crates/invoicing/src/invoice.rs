use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use invoicekit_core::{
    AggregateRoot, DomainError, DomainResult, Entity, InvoiceNumber, InvoiceSequence,
};
use invoicekit_products::Product;

/// Prefix of the last report line, followed by the number of distinct lines.
pub const LINE_COUNT_PREFIX: &str = "Liczba pozycji: ";

/// Identity of a line: products agreeing on all of these merge into one line.
///
/// Amounts compare by value *and* scale, so `5` and `5.00` are different
/// lines. Field order doubles as the report order (name first).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct LineKey {
    name: String,
    price: Decimal,
    tax_percent: Decimal,
    excise: Decimal,
    price_scale: u32,
    tax_scale: u32,
    excise_scale: u32,
}

impl LineKey {
    fn of(product: &Product) -> Self {
        Self {
            name: product.name().to_owned(),
            price: product.price(),
            tax_percent: product.tax_percent(),
            excise: product.excise(),
            price_scale: product.price().scale(),
            tax_scale: product.tax_percent().scale(),
            excise_scale: product.excise().scale(),
        }
    }
}

/// Invoice line: the first-seen product of a key plus the merged quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    product: Product,
    quantity: u64,
}

impl InvoiceLine {
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Always positive.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn net_amount(&self) -> Decimal {
        self.product.price() * Decimal::from(self.quantity)
    }

    /// Taxed amount for the whole line (excise not included).
    pub fn gross_amount(&self) -> Decimal {
        self.product.price_with_tax() * Decimal::from(self.quantity)
    }

    fn checked_net_amount(&self) -> Option<Decimal> {
        self.product.price().checked_mul(Decimal::from(self.quantity))
    }

    fn checked_gross_amount(&self) -> Option<Decimal> {
        self.product
            .price_with_tax()
            .checked_mul(Decimal::from(self.quantity))
    }
}

/// Serializable point-in-time view of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSnapshot {
    pub number: InvoiceNumber,
    pub lines: Vec<InvoiceLine>,
    pub net_total: Decimal,
    pub tax_total: Decimal,
    pub gross_total: Decimal,
}

/// Aggregate root: Invoice.
///
/// Holds distinct product lines keyed by (name, price, tax, excise). Lines can
/// only be added; adding a product whose key already exists bumps that line's
/// quantity.
///
/// Every accepted line keeps the invoice's amounts (line amounts and totals)
/// representable, so the query methods never overflow.
#[derive(Debug)]
pub struct Invoice {
    number: InvoiceNumber,
    lines: BTreeMap<LineKey, InvoiceLine>,
    version: u64,
}

impl Invoice {
    /// Open an empty invoice numbered from the process-wide sequence.
    pub fn new() -> Self {
        Self::with_sequence(InvoiceSequence::process())
    }

    /// Open an empty invoice numbered from `sequence`.
    pub fn with_sequence(sequence: &InvoiceSequence) -> Self {
        let number = sequence.next();
        tracing::debug!(invoice = %number, "invoice opened");
        Self {
            number,
            lines: BTreeMap::new(),
            version: 0,
        }
    }

    pub fn number(&self) -> InvoiceNumber {
        self.number
    }

    /// Add a single unit of `product`.
    pub fn add_product(&mut self, product: &Product) -> DomainResult<()> {
        self.add_product_with_quantity(product, 1)
    }

    /// Add `quantity` units of `product`, merging with an existing line of the
    /// same key.
    ///
    /// The first product added under a key stays the line's product. On error
    /// the invoice is left untouched.
    pub fn add_product_with_quantity(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::invalid_operation("quantity must be positive"));
        }
        let quantity = quantity.unsigned_abs();

        let key = LineKey::of(product);
        let candidate = match self.lines.get(&key) {
            Some(line) => InvoiceLine {
                product: line.product.clone(),
                quantity: line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| DomainError::invalid_operation("line quantity overflow"))?,
            },
            None => InvoiceLine {
                product: product.clone(),
                quantity,
            },
        };

        if self.checked_totals_with(&key, &candidate).is_none() {
            return Err(DomainError::invalid_operation("invoice amount overflow"));
        }

        tracing::debug!(
            invoice = %self.number,
            product = product.name(),
            quantity = candidate.quantity,
            merged = candidate.quantity != quantity,
            "invoice line recorded"
        );
        self.lines.insert(key, candidate);

        self.version += 1;
        Ok(())
    }

    /// (net, gross) totals if `candidate` replaced the line under `key`, or
    /// `None` when any line amount or total would overflow.
    fn checked_totals_with(
        &self,
        key: &LineKey,
        candidate: &InvoiceLine,
    ) -> Option<(Decimal, Decimal)> {
        self.lines
            .iter()
            .filter(|(existing, _)| *existing != key)
            .map(|(_, line)| line)
            .chain(std::iter::once(candidate))
            .try_fold((Decimal::ZERO, Decimal::ZERO), |(net, gross), line| {
                Some((
                    net.checked_add(line.checked_net_amount()?)?,
                    gross.checked_add(line.checked_gross_amount()?)?,
                ))
            })
    }

    /// Sum of `price * quantity` over all lines.
    pub fn net_total(&self) -> Decimal {
        self.lines.values().map(InvoiceLine::net_amount).sum()
    }

    /// Sum of `price_with_tax * quantity` over all lines.
    pub fn gross_total(&self) -> Decimal {
        self.lines.values().map(InvoiceLine::gross_amount).sum()
    }

    /// Derived as gross minus net so the two always reconcile exactly.
    pub fn tax_total(&self) -> Decimal {
        self.gross_total() - self.net_total()
    }

    /// Lines in report order.
    pub fn lines(&self) -> impl Iterator<Item = &InvoiceLine> {
        self.lines.values()
    }

    /// Number of distinct lines (not the sum of quantities).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity on the line `product` would merge into, 0 if none.
    pub fn quantity_of(&self, product: &Product) -> u64 {
        self.lines
            .get(&LineKey::of(product))
            .map_or(0, InvoiceLine::quantity)
    }

    /// Render the report: `display_number`, one `name,quantity,gross` row per
    /// line ordered by name, then the line count.
    ///
    /// `display_number` is whatever the caller wants printed; it need not be
    /// this invoice's own number and may be negative.
    pub fn string_format(&self, display_number: impl Into<i64>) -> Vec<String> {
        let mut report = Vec::with_capacity(self.lines.len() + 2);
        report.push(display_number.into().to_string());
        report.extend(self.lines.values().map(|line| {
            format!(
                "{},{},{}",
                line.product.name(),
                line.quantity,
                line.gross_amount()
            )
        }));
        report.push(format!("{LINE_COUNT_PREFIX}{}", self.lines.len()));
        report
    }

    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot {
            number: self.number,
            lines: self.lines.values().cloned().collect(),
            net_total: self.net_total(),
            tax_total: self.tax_total(),
            gross_total: self.gross_total(),
        }
    }
}

impl Default for Invoice {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Invoice {
    type Id = InvoiceNumber;

    fn id(&self) -> &Self::Id {
        &self.number
    }
}

impl AggregateRoot for Invoice {
    fn version(&self) -> u64 {
        self.version
    }
}
