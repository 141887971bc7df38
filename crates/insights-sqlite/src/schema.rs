//! Table and column names shared with the ingestion job that fills the store.
//!
//! Names are matched exactly; nothing outside this module spells them.

pub mod roa {
    pub const TABLE: &str = "ROA_MONTHLY";
    pub const COUNTRY: &str = "country_code";
    pub const IP_VERSION: &str = "ip_version";
    pub const DATE: &str = "date";
    pub const COVERAGE: &str = "percentage_space_covered_by_roa";
}

pub mod top_asns {
    pub const TABLE: &str = "Top_4_ASNs";
    pub const COUNTRY: &str = "cc";
    pub const DATE: &str = "date";
    pub const ASN: &str = "asn";
    pub const ASN_NAME: &str = "asn_name";
    pub const SUBS: &str = "subs";
    pub const PERCENTAGE: &str = "percentage";
}

pub mod hhi {
    pub const TABLE: &str = "Herfindahl_Hirschman_Index";
    pub const COUNTRY: &str = "Country_Code";
    pub const TOTAL_USERS: &str = "Total_Users";
    pub const ASN_COUNT: &str = "Number_of_ASNs";
    pub const HHI: &str = "HHI";
}

pub mod ipv6 {
    pub const TABLE: &str = "Country_IPv6_Adoption";
    pub const COUNTRY: &str = "country_code";
    pub const DATE: &str = "date";
    pub const PERCENTAGE: &str = "percentage";
    pub const SOURCE: &str = "source";

    /// Measurement sources the ingestion job is known to publish.
    pub const SOURCES: &[&str] = &["google", "facebook", "akamai", "cisco", "cloudflare"];
}

pub(crate) fn roa_monthly_sql() -> String {
    use roa::*;
    format!(
        "SELECT {DATE}, {COVERAGE} FROM {TABLE}
         WHERE {COUNTRY} = ?1 AND {IP_VERSION} = ?2 AND {DATE} >= ?3 AND {DATE} <= ?4
         ORDER BY {DATE}"
    )
}

/// Latest snapshot is resolved per country, not across the whole table.
/// `subs` may be stored as TEXT, so it is ranked numerically.
pub(crate) fn top_asns_sql() -> String {
    use top_asns::*;
    format!(
        "SELECT {DATE}, {ASN_NAME}, {ASN}, {SUBS}, {PERCENTAGE} FROM {TABLE}
         WHERE {COUNTRY} = ?1 AND {DATE} = (SELECT MAX({DATE}) FROM {TABLE} WHERE {COUNTRY} = ?1)
         ORDER BY CAST({SUBS} AS REAL) DESC"
    )
}

pub(crate) fn hhi_sql() -> String {
    use hhi::*;
    format!(
        "SELECT {COUNTRY}, {TOTAL_USERS}, {ASN_COUNT}, {HHI} FROM {TABLE}
         WHERE {COUNTRY} = ?1"
    )
}

pub(crate) fn ipv6_select_sql() -> String {
    use ipv6::*;
    format!("SELECT a.{COUNTRY}, a.{DATE}, a.{PERCENTAGE}, a.{SOURCE} FROM {TABLE} AS a WHERE a.{COUNTRY} = ?")
}

pub(crate) fn ipv6_latest_per_source_clause() -> String {
    use ipv6::*;
    format!(
        " AND a.{DATE} = (SELECT MAX(b.{DATE}) FROM {TABLE} AS b
           WHERE b.{COUNTRY} = a.{COUNTRY} AND b.{SOURCE} = a.{SOURCE})"
    )
}

/// Table layout as written by the ingestion job. The query layer never runs
/// this; it exists so fixture stores match production.
pub const DDL: &str = r#"
BEGIN;

CREATE TABLE ROA_MONTHLY (
  country_code                     TEXT NOT NULL,
  ip_version                       INTEGER NOT NULL,
  date                             TEXT NOT NULL,
  percentage_space_covered_by_roa  REAL
);

CREATE TABLE Top_4_ASNs (
  cc          TEXT NOT NULL,
  date        TEXT NOT NULL,
  asn         TEXT,
  asn_name    TEXT,
  subs        INTEGER,
  percentage  REAL
);

CREATE TABLE Herfindahl_Hirschman_Index (
  Country_Code    TEXT NOT NULL,
  Total_Users     INTEGER,
  Number_of_ASNs  INTEGER,
  HHI             REAL
);

CREATE TABLE Country_IPv6_Adoption (
  country_code  TEXT NOT NULL,
  date          TEXT NOT NULL,
  percentage    REAL,
  source        TEXT NOT NULL
);

CREATE INDEX idx_roa_lookup ON ROA_MONTHLY(country_code, ip_version, date);
CREATE INDEX idx_top_asns_cc ON Top_4_ASNs(cc, date);
CREATE INDEX idx_ipv6_lookup ON Country_IPv6_Adoption(country_code, source, date);

COMMIT;
"#;
