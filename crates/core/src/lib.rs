pub mod amount;
pub mod config;
pub mod date;
pub mod record;
pub mod summary;

pub use amount::Amount;
pub use config::{ConfigError, ExportConfig};
pub use date::StatementDate;
pub use record::{sort_by_date, TransactionRecord};
pub use summary::{summarize, Summary};
