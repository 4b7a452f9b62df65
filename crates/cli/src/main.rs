//! Builds a sample invoice and logs its report and totals.
//!
//! `INVOICE_DISPLAY_NUMBER` overrides the number printed in the report header.

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use invoicekit_invoicing::Invoice;
use invoicekit_products::Product;

const DISPLAY_NUMBER_VAR: &str = "INVOICE_DISPLAY_NUMBER";

fn sample_invoice() -> anyhow::Result<Invoice> {
    let mut invoice = Invoice::new();

    let bread = Product::tax_free("Chleb", dec!(5))?;
    let kefir = Product::dairy("Kefir", dec!(3.49))?;
    let beer = Product::other("Piwko", dec!(4.99))?;
    let pin = Product::new("Pinezka", dec!(0.01), dec!(0.23), Decimal::ZERO)?;
    let fuel = Product::fuel("Benzyna", dec!(6.20))?;

    invoice.add_product_with_quantity(&bread, 2)?;
    invoice.add_product(&kefir)?;
    invoice.add_product_with_quantity(&beer, 6)?;
    invoice.add_product_with_quantity(&pin, 1000)?;
    invoice.add_product_with_quantity(&pin, 1000)?;
    invoice.add_product_with_quantity(&fuel, 40)?;

    Ok(invoice)
}

fn display_number(invoice: &Invoice) -> anyhow::Result<i64> {
    let own = || i64::try_from(invoice.number().get()).context("invoice number out of range");
    match std::env::var(DISPLAY_NUMBER_VAR) {
        Ok(raw) => match raw.trim().parse::<i64>() {
            Ok(number) => Ok(number),
            Err(_) => {
                tracing::warn!(value = %raw, "{DISPLAY_NUMBER_VAR} is not a number; using invoice number");
                own()
            }
        },
        Err(_) => own(),
    }
}

fn main() -> anyhow::Result<()> {
    invoicekit_observability::init();

    let invoice = sample_invoice().context("building sample invoice")?;

    for line in invoice.string_format(display_number(&invoice)?) {
        tracing::info!("{line}");
    }

    tracing::info!(
        invoice = %invoice.number(),
        net = %invoice.net_total(),
        tax = %invoice.tax_total(),
        gross = %invoice.gross_total(),
        "invoice totals"
    );

    let snapshot = serde_json::to_string(&invoice.snapshot()).context("serializing invoice")?;
    tracing::info!(%snapshot, "invoice snapshot");

    Ok(())
}
