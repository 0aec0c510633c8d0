//! Rule-based field primitives shared by both document layouts.

pub mod address;
pub mod amounts;
pub mod dates;
pub mod lines;
pub mod names;
pub mod patterns;
pub mod serial;

pub use address::{extract_city, is_address_line, ADDRESS_LOOKAHEAD};
pub use amounts::{contains_money, parse_money, AmountExtractor};
pub use dates::{parse_date, DateExtractor};
pub use lines::{line_starting_with, line_value, position_of, position_starting_with, split_lines};
pub use names::normalize_name;
pub use serial::{is_serial_value, SerialExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
