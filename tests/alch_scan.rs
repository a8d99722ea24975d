// tests/alch_scan.rs
//
// High-alch scan over a small catalog with scripted prices.
//
mod common;

use osrs_utils::alch::{self, AlchCandidate, AlchQuery};
use osrs_utils::config::consts::NATURE_RUNE_ID;
use osrs_utils::progress::Progress;
use osrs_utils::{ClientOptions, Error, ItemRecord, PriceClient};
use serde_json::json;

use common::{graph_body, graph_url, MockTransport};

fn items() -> Vec<ItemRecord> {
    serde_json::from_value(json!([
        { "id": 1391, "name": "Battlestaff", "members": true, "highalch": 4200 },
        { "id": 1393, "name": "Fire battlestaff", "members": true, "highalch": 9300 },
        { "id": 1395, "name": "Water battlestaff", "members": true, "highalch": 9300 },
        { "id": 1397, "name": "Air battlestaff", "members": true, "highalch": 9300 },
        { "id": 6562, "name": "Mud battlestaff" },
        { "id": 1379, "name": "Staff", "highalch": 9 }
    ]))
    .unwrap()
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<u32>,
    failed: Vec<u32>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, id: u32, _name: &str) { self.done.push(id); }
    fn item_failed(&mut self, id: u32, _name: &str) { self.failed.push(id); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn keeps_profitable_items_and_skips_unpriced_ones() {
    let mock = MockTransport::new();
    mock.ok(graph_url(NATURE_RUNE_ID), graph_body(110))
        .ok(graph_url(1391), graph_body(4000)) // 4200 - 110 - 4000 = 90
        .ok(graph_url(1393), graph_body(9200)) // 9300 - 110 - 9200 = -10
        .ok(graph_url(1395), graph_body(9250)) // -60
        .status(graph_url(1397), 404);         // no price → skipped
    let prices = PriceClient::with_transport(&ClientOptions::default(), Box::new(mock.clone()));

    let query = AlchQuery { name: Some("battlestaff".into()), min_profit: -10, ..AlchQuery::default() };
    let mut rec = Recorder::default();
    let found = alch::scan(&items(), &query, &prices, Some(&mut rec)).unwrap();

    assert_eq!(found, vec![
        AlchCandidate { id: 1391, name: "Battlestaff".into(), highalch: 4200, price: 4000, profit: 90 },
        AlchCandidate { id: 1393, name: "Fire battlestaff".into(), highalch: 9300, price: 9200, profit: -10 },
    ]);

    // Mud battlestaff has no high-alch value and is never priced
    assert_eq!(rec.total, 4);
    assert_eq!(rec.done, [1391, 1393, 1395]);
    assert_eq!(rec.failed, [1397]);
    assert!(rec.finished);
    assert!(!mock.calls().iter().any(|c| c.url == graph_url(6562)));
}

#[test]
fn unpriceable_rune_aborts_the_scan() {
    let mock = MockTransport::new();
    mock.status(graph_url(NATURE_RUNE_ID), 500);
    let prices = PriceClient::with_transport(&ClientOptions::default(), Box::new(mock.clone()));

    let err = alch::scan(&items(), &AlchQuery::default(), &prices, None).unwrap_err();
    assert!(matches!(err, Error::Net(_)));
    assert_eq!(mock.calls().len(), 1);
}
