use insights_core::{CountryCode, Outcome};
use insights_sqlite::{HhiRecord, Ipv6Adoption, Ipv6Filter, Store, TopAsnSnapshot};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Keys the envelope itself uses; a country code may not shadow them.
const ENVELOPE_KEYS: [&str; 2] = ["status", "error_message"];

/// Monthly coverage keyed by date. Serializes as `{"<country>": {"<date>": pct}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoaCoverage {
    pub country_code: CountryCode,
    pub series: BTreeMap<String, Option<f64>>,
}

impl Serialize for RoaCoverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.country_code, &self.series)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rows<T> {
    pub data: Vec<T>,
}

/// Scoped lookup: open a connection, run `f`, drop the connection, and fold
/// any fault into the failure variant.
fn run<T>(store: &Store, tool: &'static str, f: impl FnOnce(&insights_sqlite::Db) -> insights_sqlite::Result<T>) -> Outcome<T> {
    let result = store.connect().and_then(|db| f(&db));
    if let Err(e) = &result {
        tracing::warn!(tool, error = %e, "lookup failed");
    }
    result.into()
}

pub fn monthly_roa_coverage(store: &Store, country_code: &str, ip_family: &str, start_date: &str, end_date: &str) -> Outcome<RoaCoverage> {
    if ENVELOPE_KEYS.contains(&country_code) {
        tracing::warn!(country_code, "country code collides with an envelope field");
        return Outcome::failure(format!("invalid country code: {country_code}"));
    }
    let country = CountryCode::from(country_code);
    run(store, "get_monthly_roa_coverage", |db| {
        let series = db
            .roa_monthly(&country, ip_family, start_date, end_date)?
            .into_iter()
            .map(|p| (p.date, p.percentage))
            .collect();
        Ok(RoaCoverage { country_code: country.clone(), series })
    })
}

/// An unknown country yields an empty ranking with no date.
pub fn top_four_asns(store: &Store, country_code: &str) -> Outcome<TopAsnSnapshot> {
    let country = CountryCode::from(country_code);
    run(store, "get_top_four_asns", |db| db.top_asns(&country))
}

pub fn country_asn_hhi(store: &Store, country_code: &str) -> Outcome<Rows<HhiRecord>> {
    let country = CountryCode::from(country_code);
    run(store, "get_country_asn_hhi", |db| Ok(Rows { data: db.asn_hhi(&country)? }))
}

pub fn country_ipv6_adoption_rate(store: &Store, country_code: &str, filter: &Ipv6Filter) -> Outcome<Rows<Ipv6Adoption>> {
    let country = CountryCode::from(country_code);
    run(store, "get_country_ipv6_adoption_rate", |db| Ok(Rows { data: db.ipv6_adoption(&country, filter)? }))
}
