// User input validation shared by the TUI, CLI and API server.
// The store accepts anything; front ends decide what a user may enter.

use crate::error::InputError;
use crate::item::Item;

/// Highest price the add form accepts
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Validate a name/price pair typed by the user
///
/// Names are trimmed and must be a single token, since the inventory file
/// splits on whitespace. Prices are rounded to cents.
pub fn parse_item_input(name: &str, price: &str) -> Result<Item, InputError> {
    let name = validate_name(name)?;
    let price = price.trim();
    let value: f64 = price
        .parse()
        .map_err(|_| InputError::InvalidPrice(price.to_string()))?;

    Ok(Item::new(name, validate_price(value)?))
}

pub fn validate_name(name: &str) -> Result<&str, InputError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(InputError::NameHasWhitespace(name.to_string()));
    }
    Ok(name)
}

pub fn validate_price(price: f64) -> Result<f64, InputError> {
    if !price.is_finite() {
        return Err(InputError::InvalidPrice(price.to_string()));
    }
    if !(0.0..=MAX_PRICE).contains(&price) {
        return Err(InputError::PriceOutOfRange {
            price,
            max: MAX_PRICE,
        });
    }
    Ok((price * 100.0).round() / 100.0)
}

/// Convert a 1-based item number, as shown in listings, to an index
pub fn parse_item_number(text: &str, len: usize) -> Result<usize, InputError> {
    let text = text.trim();
    let number: usize = text
        .parse()
        .map_err(|_| InputError::InvalidNumber(text.to_string()))?;
    item_number_to_index(number, len)
}

pub fn item_number_to_index(number: usize, len: usize) -> Result<usize, InputError> {
    if number == 0 || number > len {
        return Err(InputError::NumberOutOfRange { number, len });
    }
    Ok(number - 1)
}

/// Listing row: `"<n>. <name> | Price: <price>"`
pub fn display_row(number: usize, item: &Item) -> String {
    format!("{}. {} | Price: {}", number, item.name(), item.price())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let item = parse_item_input("  Pen ", " 10.499 ").unwrap();
        assert_eq!(item, Item::new("Pen", 10.5));

        assert_eq!(parse_item_input("Free", "0").unwrap().price(), 0.0);
        assert_eq!(parse_item_input("Car", "1000000").unwrap().price(), MAX_PRICE);
    }

    #[test]
    fn test_rejected_names() {
        assert_eq!(parse_item_input("   ", "1"), Err(InputError::EmptyName));
        assert_eq!(
            parse_item_input("Blue Pen", "1"),
            Err(InputError::NameHasWhitespace("Blue Pen".to_string()))
        );
    }

    #[test]
    fn test_rejected_prices() {
        assert_eq!(
            parse_item_input("Pen", "cheap"),
            Err(InputError::InvalidPrice("cheap".to_string()))
        );
        assert!(matches!(
            parse_item_input("Pen", "-1"),
            Err(InputError::PriceOutOfRange { .. })
        ));
        assert!(matches!(
            parse_item_input("Pen", "1000000.01"),
            Err(InputError::PriceOutOfRange { .. })
        ));
        assert!(matches!(parse_item_input("Pen", "inf"), Err(InputError::InvalidPrice(_))));
    }

    #[test]
    fn test_item_numbers_are_one_based() {
        assert_eq!(parse_item_number("1", 3), Ok(0));
        assert_eq!(parse_item_number(" 3 ", 3), Ok(2));
        assert_eq!(
            parse_item_number("0", 3),
            Err(InputError::NumberOutOfRange { number: 0, len: 3 })
        );
        assert_eq!(
            parse_item_number("4", 3),
            Err(InputError::NumberOutOfRange { number: 4, len: 3 })
        );
        assert_eq!(
            parse_item_number("-1", 3),
            Err(InputError::InvalidNumber("-1".to_string()))
        );
        assert!(parse_item_number("1", 0).is_err());
    }

    #[test]
    fn test_display_row() {
        assert_eq!(display_row(1, &Item::new("Pen", 10.0)), "1. Pen | Price: 10");
        assert_eq!(display_row(2, &Item::new("Book", 4.25)), "2. Book | Price: 4.25");
    }
}
