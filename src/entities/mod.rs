//! Typed QuickBooks entities and the shared sub-objects they compose.

pub mod base;
pub mod bill;
pub mod bill_payment;
pub mod customer;
pub mod department;
pub mod estimate;
pub mod invoice;
pub mod item;
pub mod journal_entry;
pub mod line;
pub mod payment;
pub mod preferences;
pub mod recurring_transaction;
pub mod sales_receipt;
pub mod tax_service;
pub mod vendor;

pub use base::{
    Address, CustomField, CustomerMemo, EmailAddress, LinkedTxn, MetaData, PhoneNumber, Ref,
    WebAddress,
};
pub use bill::Bill;
pub use bill_payment::{BillPayment, BillPaymentCheck, BillPaymentCreditCard};
pub use customer::Customer;
pub use department::Department;
pub use estimate::Estimate;
pub use invoice::Invoice;
pub use item::Item;
pub use journal_entry::{JournalEntry, JournalEntryEntity, JournalEntryLineDetail, PostingType};
pub use line::{
    AccountBasedExpenseLineDetail, DescriptionLineDetail, DiscountLineDetail, GroupLineDetail,
    ItemBasedExpenseLineDetail, Line, LineDetail, SalesItemLineDetail, SubTotalLineDetail,
    TaxLineDetail, TxnTaxDetail,
};
pub use payment::Payment;
pub use preferences::Preferences;
pub use recurring_transaction::RecurringTransaction;
pub use sales_receipt::SalesReceipt;
pub use tax_service::{TaxRateDetails, TaxService};
pub use vendor::Vendor;
