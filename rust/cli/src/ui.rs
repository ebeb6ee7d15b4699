//! UI helper functions for terminal output formatting.

use cribbage_engine::cards::Card;
use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Space-separated card symbols, e.g. `AC 7H KD`.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cards_with_symbols() {
        let cards = [Card::new(0).unwrap(), Card::new(22).unwrap(), Card::new(51).unwrap()];
        assert_eq!(format_cards(&cards), "AC TH KD");
        assert_eq!(format_cards(&[]), "");
    }

    #[test]
    fn warning_has_prefix() {
        let mut err = Vec::new();
        display_warning(&mut err, "careful").unwrap();
        assert_eq!(String::from_utf8(err).unwrap(), "WARNING: careful\n");
    }
}
