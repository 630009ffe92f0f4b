//! Common type definitions.
//!
//! # ID Types
//!
//! Both tables use `SERIAL` primary keys, so IDs are plain `i32` values wrapped in
//! type aliases to keep signatures readable:
//!
//! - [`CustomerId`]: Customer identifier
//! - [`ReservationId`]: Reservation identifier
//!
//! # Utility Functions
//!
//! - [`escape_like`]: Escape LIKE/ILIKE metacharacters in user input

// Type aliases for IDs
pub type CustomerId = i32;
pub type ReservationId = i32;

/// Escape `\`, `%` and `_` so the input matches literally inside a LIKE/ILIKE pattern.
/// Example: "100%_off" -> "100\%\_off"
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
