// ============================================================
// CSV INFRASTRUCTURE
// ============================================================
// Decoding, delimiter sniffing, and parsing of delimited text

pub mod decoder;
pub mod parser;
pub mod sniffer;

pub use decoder::{decode, Encoding};
pub use parser::{CsvParser, ParsedTable};
pub use sniffer::sniff;
