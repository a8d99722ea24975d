// src/alch.rs
//
// High-alchemy profit scan: which items are worth buying on the GE and
// casting High Level Alchemy on, after paying for the nature rune.

use serde::Serialize;

use crate::catalog::{ItemRecord, SearchCriteria};
use crate::config::consts::NATURE_RUNE_ID;
use crate::error::Result;
use crate::prices::PriceClient;
use crate::progress::Progress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlchQuery {
    /// Case-insensitive name substring; `None` scans every alchable item.
    pub name: Option<String>,
    /// Keep items whose profit is at least this (may be negative).
    pub min_profit: i64,
    pub rune_id: u32,
}

impl Default for AlchQuery {
    fn default() -> Self {
        Self { name: None, min_profit: 0, rune_id: NATURE_RUNE_ID }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlchCandidate {
    pub id: u32,
    pub name: String,
    pub highalch: i64,
    pub price: i64,
    pub profit: i64,
}

pub fn profit(highalch: i64, rune_price: i64, item_price: i64) -> i64 {
    (highalch - rune_price) - item_price
}

/// Price every matching item and keep the profitable ones, in catalog order.
///
/// One price request per item; spacing comes from the client's
/// [`Pacing`](crate::prices::Pacing). An item whose price comes back as the
/// `0` "no data" value is skipped and reported as failed rather than
/// treated as free. Fails only if the rune itself can't be priced.
pub fn scan(
    items: &[ItemRecord],
    query: &AlchQuery,
    prices: &PriceClient,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<AlchCandidate>> {
    let rune_price = prices.try_current_price(query.rune_id)?;
    logf!("Alch scan: rune {} costs {rune_price}", query.rune_id);

    let mut criteria = SearchCriteria::new();
    criteria.name = query.name.clone();
    let pool: Vec<(ItemRecord, i64)> = criteria
        .filter(items)
        .into_iter()
        .filter_map(|i| i.highalch.map(|h| (i, h)))
        .collect();

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Nature rune price: {rune_price}"));
        p.begin(pool.len());
    }

    let mut out = Vec::new();
    for (item, highalch) in pool {
        let price = prices.current_price(item.id);
        if price == 0 {
            logd!("Alch scan: no price for {} ({}), skipped", item.name, item.id);
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(item.id, &item.name);
            }
            continue;
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(item.id, &item.name);
        }

        let profit = profit(highalch, rune_price, price);
        if profit >= query.min_profit {
            out.push(AlchCandidate { id: item.id, name: item.name, highalch, price, profit });
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::profit;

    #[test]
    fn profit_subtracts_rune_and_item() {
        // Battlestaff: 7,650 high alch, rune 110, bought at 7,600
        assert_eq!(profit(7_650, 110, 7_600), -60);
        assert_eq!(profit(7_650, 110, 7_500), 40);
    }
}
