pub mod amount;
pub mod config;
pub mod date;
pub mod description;
pub mod error;
pub mod header;
pub mod merchant;
pub mod parser;
pub mod profile;
pub mod source;
pub mod statement;
pub mod transaction;

pub use config::{Encoding, Settings};
pub use error::{ImportError, RowError};
pub use parser::Parser;
pub use profile::{FormatKind, FormatProfile};
pub use statement::Statement;
pub use transaction::{Transaction, TransactionType};
