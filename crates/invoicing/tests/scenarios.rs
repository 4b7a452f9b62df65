//! End-to-end invoice scenarios: building invoices from catalogue products and
//! checking totals and the rendered report.

use invoicekit_core::{DomainError, InvoiceSequence};
use invoicekit_invoicing::Invoice;
use invoicekit_products::Product;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn fresh_invoice() -> Invoice {
    Invoice::with_sequence(&InvoiceSequence::new())
}

#[test]
fn vegetables_added_twice_sum_net() {
    let mut invoice = fresh_invoice();
    let veg = Product::tax_free("Warzywa", dec!(10)).unwrap();
    invoice.add_product(&veg).unwrap();
    invoice.add_product(&veg).unwrap();

    assert_eq!(invoice.net_total(), dec!(20));
    assert_eq!(invoice.line_count(), 1);
}

#[test]
fn vegetables_with_quantity_hundred() {
    let mut invoice = fresh_invoice();
    invoice
        .add_product_with_quantity(&Product::tax_free("Warzywa", dec!(10)).unwrap(), 100)
        .unwrap();

    assert_eq!(invoice.net_total(), dec!(1000));
}

#[test]
fn mixed_tax_rates_tax_total() {
    let mut invoice = fresh_invoice();
    invoice
        .add_product(&Product::tax_free("Pampersy", dec!(200)).unwrap())
        .unwrap();
    invoice
        .add_product(&Product::dairy("Kefir", dec!(100)).unwrap())
        .unwrap();
    invoice
        .add_product(&Product::other("Piwko", dec!(10)).unwrap())
        .unwrap();

    assert_eq!(invoice.net_total(), dec!(310));
    assert_eq!(invoice.tax_total(), dec!(10.30));
    assert_eq!(invoice.gross_total(), dec!(320.30));
}

#[test]
fn empty_invoice_totals_are_zero() {
    let invoice = fresh_invoice();
    assert_eq!(invoice.net_total(), Decimal::ZERO);
    assert_eq!(invoice.tax_total(), Decimal::ZERO);
    assert_eq!(invoice.gross_total(), Decimal::ZERO);
}

#[test]
fn bread_report_layout() {
    let mut invoice = fresh_invoice();
    invoice
        .add_product_with_quantity(&Product::tax_free("Chleb", dec!(5)).unwrap(), 2)
        .unwrap();

    assert_eq!(
        invoice.string_format(42),
        vec!["42", "Chleb,2,10", "Liczba pozycji: 1"]
    );
}

#[test]
fn pins_keep_unrounded_precision_after_merge() {
    let mut invoice = fresh_invoice();
    let pin = Product::new("Pinezka", dec!(0.01), dec!(0.23), Decimal::ZERO).unwrap();
    invoice.add_product_with_quantity(&pin, 1000).unwrap();
    invoice.add_product_with_quantity(&pin, 1000).unwrap();

    let report = invoice.string_format(1);
    assert_eq!(report.len(), 3);
    assert_eq!(report[1], "Pinezka,2000,24.6000");
    assert_eq!(report[2], "Liczba pozycji: 1");
}

#[test]
fn failed_additions_leave_invoice_unchanged() {
    let mut invoice = fresh_invoice();
    let veg = Product::tax_free("Warzywa", dec!(10)).unwrap();
    invoice.add_product(&veg).unwrap();
    let before = invoice.snapshot();

    for quantity in [0, -1] {
        let err = invoice.add_product_with_quantity(&veg, quantity).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
        assert_eq!(invoice.snapshot(), before);
    }
}

#[test]
fn invoices_get_increasing_numbers() {
    let first = Invoice::new();
    let second = Invoice::new();
    assert!(first.number() < second.number());
    assert_eq!(first.number(), first.number());
}

#[test]
fn display_number_is_independent_of_invoice_number() {
    let invoice = fresh_invoice();
    assert_eq!(invoice.number().get(), 1);
    assert_eq!(invoice.string_format(999)[0], "999");
    assert_eq!(invoice.string_format(-1)[0], "-1");
}

#[test]
fn same_price_written_differently_stays_on_separate_lines() {
    let mut invoice = fresh_invoice();
    invoice
        .add_product(&Product::tax_free("Chleb", dec!(5)).unwrap())
        .unwrap();
    invoice
        .add_product(&Product::tax_free("Chleb", dec!(5.00)).unwrap())
        .unwrap();

    assert_eq!(
        invoice.string_format(1),
        vec!["1", "Chleb,1,5", "Chleb,1,5.00", "Liczba pozycji: 2"]
    );
}

#[test]
fn oversized_quantity_is_refused_and_queries_keep_working() {
    let mut invoice = fresh_invoice();
    let house = Product::tax_free("Dom", dec!(10000000000)).unwrap();

    let err = invoice
        .add_product_with_quantity(&house, i64::MAX)
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidOperation(_)));

    assert_eq!(invoice.net_total(), Decimal::ZERO);
    assert_eq!(invoice.string_format(1), vec!["1", "Liczba pozycji: 0"]);
}
