//! Invoicing domain module.
//!
//! This crate contains business rules for invoices: merging product lines,
//! computing totals and rendering the line-item report. Pure domain logic
//! (no IO, no HTTP, no storage).

pub mod invoice;

pub use invoice::{Invoice, InvoiceLine, InvoiceSnapshot, LINE_COUNT_PREFIX};
pub use invoicekit_core::{InvoiceNumber, InvoiceSequence};
