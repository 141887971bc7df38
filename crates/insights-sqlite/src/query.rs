use crate::error::Result;
use crate::models::{AsnShare, DateWindow, HhiRecord, Ipv6Adoption, Ipv6Filter, RoaPoint, TopAsnSnapshot};
use crate::schema;
use crate::value::{self, LooseInt, LooseReal, LooseText};
use crate::Db;
use insights_core::CountryCode;
use rusqlite::{params, params_from_iter};

impl Db {
    /// Monthly ROA coverage with `date` in `[start_date, end_date]`.
    ///
    /// `ip_family` is bound as given; values other than "4"/"6" match nothing.
    pub fn roa_monthly(&self, country: &CountryCode, ip_family: &str, start_date: &str, end_date: &str) -> Result<Vec<RoaPoint>> {
        let mut stmt = self.conn.prepare(&schema::roa_monthly_sql())?;
        let rows = stmt
            .query_map(params![country.as_str(), ip_family, start_date, end_date], |r| {
                Ok(RoaPoint { date: r.get::<_, LooseText>(0)?.0, percentage: value::real(r.get::<_, Option<LooseReal>>(1)?) })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(table = schema::roa::TABLE, %country, ip_family, rows = rows.len(), "roa coverage query");
        Ok(rows)
    }

    /// Ranking for the newest snapshot date of `country`, largest first.
    pub fn top_asns(&self, country: &CountryCode) -> Result<TopAsnSnapshot> {
        let mut stmt = self.conn.prepare(&schema::top_asns_sql())?;
        let mut snapshot = TopAsnSnapshot::default();
        let mut rows = stmt.query(params![country.as_str()])?;
        while let Some(r) = rows.next()? {
            if snapshot.date.is_none() {
                snapshot.date = Some(r.get::<_, LooseText>(0)?.0);
            }
            snapshot.data.push(AsnShare {
                country_code: country.clone(),
                asn_name: value::text(r.get(1)?),
                asn: value::text(r.get(2)?),
                subs_count: value::int(r.get::<_, Option<LooseInt>>(3)?),
                percentage: value::real(r.get(4)?),
            });
        }
        tracing::debug!(table = schema::top_asns::TABLE, %country, date = ?snapshot.date, rows = snapshot.data.len(), "top asn query");
        Ok(snapshot)
    }

    pub fn asn_hhi(&self, country: &CountryCode) -> Result<Vec<HhiRecord>> {
        let mut stmt = self.conn.prepare(&schema::hhi_sql())?;
        let rows = stmt
            .query_map(params![country.as_str()], |r| {
                Ok(HhiRecord {
                    country_code: CountryCode(r.get::<_, LooseText>(0)?.0),
                    total_users: value::int(r.get(1)?),
                    number_of_asns: value::int(r.get(2)?),
                    hhi: value::real(r.get(3)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(table = schema::hhi::TABLE, %country, rows = rows.len(), "hhi query");
        Ok(rows)
    }

    /// IPv6 adoption rows. See [`Ipv6Filter::window`] for how the date
    /// arguments combine.
    pub fn ipv6_adoption(&self, country: &CountryCode, filter: &Ipv6Filter) -> Result<Vec<Ipv6Adoption>> {
        let mut sql = schema::ipv6_select_sql();
        let mut args: Vec<&str> = vec![country.as_str()];
        if let Some(source) = filter.source() {
            sql.push_str(&format!(" AND a.{} = ?", schema::ipv6::SOURCE));
            args.push(source);
        }
        let window = filter.window();
        match window {
            DateWindow::Exact(date) => {
                sql.push_str(&format!(" AND a.{} = ?", schema::ipv6::DATE));
                args.push(date);
            }
            DateWindow::Range { start, end } => {
                if let Some(start) = start {
                    sql.push_str(&format!(" AND a.{} >= ?", schema::ipv6::DATE));
                    args.push(start);
                }
                if let Some(end) = end {
                    sql.push_str(&format!(" AND a.{} <= ?", schema::ipv6::DATE));
                    args.push(end);
                }
            }
            DateWindow::LatestPerSource => sql.push_str(&schema::ipv6_latest_per_source_clause()),
        }
        sql.push_str(&format!(" ORDER BY a.{}, a.{}", schema::ipv6::DATE, schema::ipv6::SOURCE));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), |r| {
                Ok(Ipv6Adoption {
                    country_code: CountryCode(r.get::<_, LooseText>(0)?.0),
                    date: r.get::<_, LooseText>(1)?.0,
                    percentage: value::real(r.get(2)?),
                    source: r.get::<_, LooseText>(3)?.0,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(table = schema::ipv6::TABLE, %country, ?window, rows = rows.len(), "ipv6 adoption query");
        Ok(rows)
    }
}
