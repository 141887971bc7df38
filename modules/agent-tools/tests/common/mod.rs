#![allow(dead_code)]

use insights_sqlite::schema::DDL;
use insights_sqlite::Store;
use rusqlite::{params, Connection};
use tempfile::TempDir;

pub struct Fixture {
    _dir: TempDir,
    pub store: Store,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("insights.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(DDL).unwrap();

    for (date, pct) in [("2022-12-01", 86.9), ("2023-01-01", 87.5), ("2023-02-01", 88.1), ("2023-03-01", 88.9), ("2023-04-01", 89.2)] {
        conn.execute("INSERT INTO ROA_MONTHLY VALUES ('NL', 4, ?, ?)", params![date, pct]).unwrap();
    }
    conn.execute("INSERT INTO ROA_MONTHLY VALUES ('NL', 6, '2023-01-01', 61.3)", []).unwrap();

    for (cc, date, asn, name, subs, pct) in [
        ("CN", "2025-07-01", "4812", "CHINANET-SH-AP China Telecom Group", 47_563_619i64, 12.17),
        ("CN", "2025-07-01", "4837", "CHINA169-BACKBONE CHINA UNICOM China169 Backbone", 125_227_396, 32.03),
        ("CN", "2025-01-01", "4837", "CHINA169-BACKBONE CHINA UNICOM China169 Backbone", 120_000_000, 31.0),
        ("NL", "2025-04-01", "1136", "KPN B.V.", 3_100_000, 31.5),
    ] {
        conn.execute("INSERT INTO Top_4_ASNs VALUES (?,?,?,?,?,?)", params![cc, date, asn, name, subs, pct]).unwrap();
    }

    conn.execute("INSERT INTO Herfindahl_Hirschman_Index VALUES ('NL', 15628918, 284, 1139.86)", []).unwrap();

    for (date, pct, source) in [
        ("2023-01-15", 50.5, "google"),
        ("2023-01-15", 48.2, "akamai"),
        ("2023-02-01", 51.0, "google"),
        ("2023-03-01", 49.0, "akamai"),
    ] {
        conn.execute("INSERT INTO Country_IPv6_Adoption VALUES ('NL', ?, ?, ?)", params![date, pct, source]).unwrap();
    }

    let store = Store::at(&path);
    Fixture { _dir: dir, store }
}
