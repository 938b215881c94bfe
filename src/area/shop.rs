//! Shop field extraction.
//!
//! A shop is a single line: keeper VNUM, five tradeable item-type codes,
//! buy and sell profit percentages, open and close hours, then the owner
//! name (conventionally introduced by a `*` comment marker). A bare `0`
//! is the legacy "no shop" terminator and produces no record.

use log::warn;
use uuid::Uuid;

use crate::area::errors::AreaError;
use crate::area::scan::parse_signed_or;
use crate::area::types::ShopRecord;
use crate::logutil::preview;

const MIN_SHOP_TOKENS: usize = 11;

/// Extract a shop from its line group. Returns `Ok(None)` for the `0`
/// terminator line; a line with fewer than eleven tokens is rejected.
pub fn extract_shop(
    group: &[String],
    id: Uuid,
    area_id: Uuid,
) -> Result<Option<ShopRecord>, AreaError> {
    let line = group
        .iter()
        .map(|l| l.as_str())
        .find(|l| !l.is_empty())
        .ok_or_else(|| AreaError::InvalidShape {
            entity: "shop",
            reason: "empty block".to_string(),
        })?;

    if line == "0" {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_SHOP_TOKENS {
        return Err(AreaError::InvalidShape {
            entity: "shop",
            reason: format!("{} token(s) in: {}", tokens.len(), preview(line)),
        });
    }

    let vnum = parse_or_warn(tokens[0], "keeper vnum", line);
    // Five trade slots; unused slots hold 0 and are filtered out.
    let trade_items = tokens[1..6]
        .iter()
        .map(|t| parse_or_warn(t, "trade code", line))
        .filter(|&code| code != 0)
        .collect();

    Ok(Some(ShopRecord {
        id,
        area_id,
        vnum,
        trade_items,
        profit_buy: parse_or_warn(tokens[6], "buy profit", line),
        profit_sell: parse_or_warn(tokens[7], "sell profit", line),
        open_hour: parse_or_warn(tokens[8], "open hour", line),
        close_hour: parse_or_warn(tokens[9], "close hour", line),
        owner_name: tokens[10..]
            .join(" ")
            .trim_start_matches('*')
            .trim()
            .to_string(),
    }))
}

fn parse_or_warn(token: &str, field: &str, line: &str) -> i64 {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        warn!(
            "shop: non-numeric {} '{}' in: {}",
            field,
            token,
            preview(line)
        );
        return 0;
    }
    parse_signed_or(token, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(line: &str) -> Result<Option<ShopRecord>, AreaError> {
        extract_shop(&[line.to_string()], Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn full_shop_line() {
        let shop = extract("3000 2 3 4 10 0 105 15 0 23 * the wizard")
            .unwrap()
            .unwrap();
        assert_eq!(shop.vnum, 3000);
        assert_eq!(shop.trade_items, vec![2, 3, 4, 10]);
        assert_eq!(shop.profit_buy, 105);
        assert_eq!(shop.profit_sell, 15);
        assert_eq!(shop.open_hour, 0);
        assert_eq!(shop.close_hour, 23);
        assert_eq!(shop.owner_name, "the wizard");
    }

    #[test]
    fn zero_line_is_no_shop() {
        assert!(extract("0").unwrap().is_none());
    }

    #[test]
    fn ten_tokens_is_one_short_and_rejected() {
        let err = extract("3000 2 3 4 10 0 105 15 0 23").unwrap_err();
        assert!(matches!(err, AreaError::InvalidShape { entity: "shop", .. }));
    }

    #[test]
    fn exactly_eleven_tokens_parses() {
        let shop = extract("3000 0 0 0 0 0 100 100 0 23 keeper")
            .unwrap()
            .unwrap();
        assert!(shop.trade_items.is_empty());
        assert_eq!(shop.owner_name, "keeper");
    }

    #[test]
    fn malformed_numbers_degrade_to_zero() {
        let shop = extract("abc 2 x 4 10 0 105 15 0 23 * keeper")
            .unwrap()
            .unwrap();
        assert_eq!(shop.vnum, 0);
        assert_eq!(shop.trade_items, vec![2, 4, 10]);
    }
}
