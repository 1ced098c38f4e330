//! Parsing of "<good> [amount]" trade orders typed at a command shell.

use crate::error::GameError;

/// Amount used when an order names no quantity: as many as possible.
pub const ALL_YOU_CAN: i64 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOrder {
    pub good: String,
    pub amount: i64,
}

/// Parse an order line. The amount must be a positive whole number.
pub fn parse_order(line: &str) -> Result<TradeOrder, GameError> {
    let mut words = line.split_whitespace();
    let good = match words.next() {
        Some(good) => good.to_lowercase(),
        None => return Err(GameError::not_found("Trade good", "")),
    };
    let amount = match words.next() {
        None => ALL_YOU_CAN,
        Some(word) => {
            let amount: i64 = word
                .parse()
                .map_err(|_| GameError::InvalidQuantity(format!("\"{word}\" is not a number")))?;
            if amount <= 0 {
                return Err(GameError::InvalidQuantity(format!("{amount} is not positive")));
            }
            amount
        }
    };
    if let Some(extra) = words.next() {
        return Err(GameError::InvalidQuantity(format!("unexpected \"{extra}\"")));
    }
    Ok(TradeOrder { good, amount })
}
