use insights_core::CountryCode;
use serde::{Deserialize, Serialize};

/// One month of ROA coverage for a country and IP family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoaPoint {
    pub date: String,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsnShare {
    pub country_code: CountryCode,
    pub asn_name: Option<String>,
    pub asn: Option<String>,
    pub subs_count: Option<i64>,
    pub percentage: Option<f64>,
}

/// Latest top-ASN ranking for one country. `date` is `None` when the
/// country has no snapshot at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopAsnSnapshot {
    pub date: Option<String>,
    pub data: Vec<AsnShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HhiRecord {
    pub country_code: CountryCode,
    pub total_users: Option<i64>,
    pub number_of_asns: Option<i64>,
    pub hhi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipv6Adoption {
    pub country_code: CountryCode,
    pub date: String,
    pub percentage: Option<f64>,
    pub source: String,
}

/// Optional filters for the IPv6 adoption lookup. Empty strings count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv6Filter {
    pub source: Option<String>,
    pub specific_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Which date restriction an [`Ipv6Filter`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow<'a> {
    /// Exactly one date; any range bounds are ignored.
    Exact(&'a str),
    /// Inclusive range, open on a missing side.
    Range { start: Option<&'a str>, end: Option<&'a str> },
    /// No date given: each source's most recent row.
    LatestPerSource,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

impl Ipv6Filter {
    pub fn source(&self) -> Option<&str> {
        present(&self.source)
    }

    pub fn window(&self) -> DateWindow<'_> {
        if let Some(d) = present(&self.specific_date) {
            return DateWindow::Exact(d);
        }
        let (start, end) = (present(&self.start_date), present(&self.end_date));
        if start.is_some() || end.is_some() {
            DateWindow::Range { start, end }
        } else {
            DateWindow::LatestPerSource
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(specific: Option<&str>, start: Option<&str>, end: Option<&str>) -> Ipv6Filter {
        Ipv6Filter {
            source: None,
            specific_date: specific.map(str::to_string),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn specific_date_wins_over_range() {
        let f = filter(Some("2024-05-01"), Some("2020-01-01"), Some("2020-12-31"));
        assert_eq!(f.window(), DateWindow::Exact("2024-05-01"));
    }

    #[test]
    fn single_sided_range_is_kept() {
        assert_eq!(
            filter(None, Some("2024-01-01"), None).window(),
            DateWindow::Range { start: Some("2024-01-01"), end: None }
        );
        assert_eq!(
            filter(None, None, Some("2024-01-01")).window(),
            DateWindow::Range { start: None, end: Some("2024-01-01") }
        );
    }

    #[test]
    fn no_dates_means_latest_per_source() {
        assert_eq!(filter(None, None, None).window(), DateWindow::LatestPerSource);
        assert_eq!(filter(Some(""), Some(""), None).window(), DateWindow::LatestPerSource);
    }

    #[test]
    fn empty_source_is_absent() {
        let f = Ipv6Filter { source: Some(String::new()), ..Default::default() };
        assert_eq!(f.source(), None);
    }
}
