#![allow(dead_code)]

use insights_sqlite::schema::DDL;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

/// Store populated the way the ingestion job lays it out. The directory is
/// removed when the fixture drops.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("insights.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(DDL).unwrap();

    for (cc, ip, date, pct) in [
        ("NL", 4, "2022-12-01", 86.9),
        ("NL", 4, "2023-01-01", 87.5),
        ("NL", 4, "2023-02-01", 88.1),
        ("NL", 4, "2023-03-01", 88.9),
        ("NL", 4, "2023-04-01", 89.2),
        ("NL", 6, "2023-01-01", 60.0),
        ("DE", 4, "2023-01-01", 55.0),
    ] {
        conn.execute("INSERT INTO ROA_MONTHLY VALUES (?,?,?,?)", params![cc, ip, date, pct]).unwrap();
    }

    for (cc, date, asn, name, subs, pct) in [
        ("NL", "2025-06-01", "1136", "KPN B.V.", 3_000_000i64, 30.0),
        ("NL", "2025-07-01", "33915", "Vodafone Libertel B.V.", 2_800_000, 28.4),
        ("NL", "2025-07-01", "1136", "KPN B.V.", 3_100_000, 31.5),
        ("NL", "2025-07-01", "15435", "DELTA Fiber Nederland B.V.", 900_000, 9.1),
        ("NL", "2025-07-01", "50266", "Odido Netherlands B.V.", 1_200_000, 12.2),
        ("DE", "2025-05-01", "3320", "Deutsche Telekom AG", 20_000_000, 40.0),
        ("DE", "2025-05-01", "3209", "Vodafone GmbH", 9_000_000, 18.0),
    ] {
        conn.execute("INSERT INTO Top_4_ASNs VALUES (?,?,?,?,?,?)", params![cc, date, asn, name, subs, pct]).unwrap();
    }

    for (cc, users, asns, hhi) in [("NL", 15_628_918i64, 284i64, 1139.86), ("DE", 40_000_000, 900, 1650.5)] {
        conn.execute("INSERT INTO Herfindahl_Hirschman_Index VALUES (?,?,?,?)", params![cc, users, asns, hhi]).unwrap();
    }

    for (cc, date, pct, source) in [
        ("NL", "2025-06-01", 55.0, "google"),
        ("NL", "2025-07-01", 56.2, "google"),
        ("NL", "2025-05-01", 47.0, "akamai"),
        ("NL", "2025-06-15", 48.0, "akamai"),
        ("NL", "2025-07-01", 50.1, "cloudflare"),
        ("DE", "2025-07-01", 70.0, "google"),
    ] {
        conn.execute("INSERT INTO Country_IPv6_Adoption VALUES (?,?,?,?)", params![cc, date, pct, source]).unwrap();
    }

    Fixture { _dir: dir, path }
}
