//! Pure mappings from upstream records to the explorer schema.

pub mod address;
pub mod block;
pub mod records;
pub mod transaction;
pub mod units;

pub use address::{address_record, is_contract_code};
pub use block::block_record;
pub use records::{AddressParam, AddressRecord, BlockRecord, Fee, TokenValue, TransactionRecord};
pub use transaction::{token_value, transaction_record, transfer_transaction_record, TRANSFER_TOPIC};
pub use units::{format_units, iso_timestamp, parse_units};
