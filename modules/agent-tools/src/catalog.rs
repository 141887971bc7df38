use insights_sqlite::schema::ipv6::SOURCES;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    MonthlyRoaCoverage,
    TopFourAsns,
    CountryAsnHhi,
    CountryIpv6AdoptionRate,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::MonthlyRoaCoverage, Tool::TopFourAsns, Tool::CountryAsnHhi, Tool::CountryIpv6AdoptionRate];

    /// Stable wire name the orchestrator calls the tool by.
    pub fn name(self) -> &'static str {
        match self {
            Tool::MonthlyRoaCoverage => "get_monthly_roa_coverage",
            Tool::TopFourAsns => "get_top_four_asns",
            Tool::CountryAsnHhi => "get_country_asn_hhi",
            Tool::CountryIpv6AdoptionRate => "get_country_ipv6_adoption_rate",
        }
    }

    pub fn spec(self) -> ToolSpec {
        let country = json!({
            "type": "string",
            "description": "ISO 3166-1 alpha-2 country code, e.g. \"NL\". Matched exactly; not case-normalized."
        });
        let (description, parameters) = match self {
            Tool::MonthlyRoaCoverage => (
                "Monthly Route Origin Authorization (ROA) coverage for a country and IP version over an inclusive date range. \
                 Returns a mapping from date to the percentage of routed address space covered by valid ROAs.",
                json!({
                    "type": "object",
                    "properties": {
                        "country_code": country,
                        "ip_family": { "type": "string", "enum": ["4", "6"], "description": "IP version: \"4\" or \"6\"." },
                        "start_date": { "type": "string", "description": "Start of the window, YYYY-MM-DD, inclusive." },
                        "end_date": { "type": "string", "description": "End of the window, YYYY-MM-DD, inclusive. Not earlier than start_date." }
                    },
                    "required": ["country_code", "ip_family", "start_date", "end_date"]
                }),
            ),
            Tool::TopFourAsns => (
                "Latest ranking of the largest Autonomous Systems serving a country by subscriber count, with market share. \
                 Returns the snapshot date and up to four entries.",
                json!({
                    "type": "object",
                    "properties": { "country_code": country },
                    "required": ["country_code"]
                }),
            ),
            Tool::CountryAsnHhi => (
                "Herfindahl-Hirschman Index (0-10000) of ISP market concentration for a country, with total users and number of ASNs.",
                json!({
                    "type": "object",
                    "properties": { "country_code": country },
                    "required": ["country_code"]
                }),
            ),
            Tool::CountryIpv6AdoptionRate => (
                "IPv6 adoption percentage for a country as measured by third-party sources. \
                 With specific_date, returns that date only (start_date/end_date are ignored). \
                 With start_date and/or end_date, returns the range, open on a missing side. \
                 With no dates, returns the latest measurement of each source.",
                json!({
                    "type": "object",
                    "properties": {
                        "country_code": country,
                        "source": { "type": "string", "enum": SOURCES, "description": "Restrict to one measurement source." },
                        "specific_date": { "type": "string", "description": "Exact date, YYYY-MM-DD." },
                        "start_date": { "type": "string", "description": "Range start, YYYY-MM-DD, inclusive." },
                        "end_date": { "type": "string", "description": "Range end, YYYY-MM-DD, inclusive." }
                    },
                    "required": ["country_code"]
                }),
            ),
        };
        ToolSpec { name: self.name(), description, parameters }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL.into_iter().find(|t| t.name() == s).ok_or_else(|| format!("unknown tool: {s}"))
    }
}

/// Function-calling definition handed to the LLM runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Groups of tools a routing label resolves to. `rpki` and `market` are
/// alternative labels for `roa` and `asn`; they share the same tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolset {
    Roa,
    Asn,
    Ipv6,
}

impl Toolset {
    pub const ALL: [Toolset; 3] = [Toolset::Roa, Toolset::Asn, Toolset::Ipv6];

    pub fn from_label(label: &str) -> Option<Toolset> {
        match label.to_ascii_lowercase().as_str() {
            "roa" | "rpki" => Some(Toolset::Roa),
            "asn" | "market" => Some(Toolset::Asn),
            "ipv6" => Some(Toolset::Ipv6),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Toolset::Roa => "roa",
            Toolset::Asn => "asn",
            Toolset::Ipv6 => "ipv6",
        }
    }

    pub fn tools(self) -> &'static [Tool] {
        match self {
            Toolset::Roa => &[Tool::MonthlyRoaCoverage],
            Toolset::Asn => &[Tool::TopFourAsns, Tool::CountryAsnHhi],
            Toolset::Ipv6 => &[Tool::CountryIpv6AdoptionRate],
        }
    }
}

/// Specs for `toolset`, or for every tool when `None`.
pub fn catalog(toolset: Option<Toolset>) -> Vec<ToolSpec> {
    match toolset {
        Some(set) => set.tools().iter().map(|t| t.spec()).collect(),
        None => Tool::ALL.iter().map(|t| t.spec()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for t in Tool::ALL {
            assert_eq!(t.name().parse::<Tool>().unwrap(), t);
        }
        assert_eq!("get_weather".parse::<Tool>().unwrap_err(), "unknown tool: get_weather");
    }

    #[test]
    fn aliases_share_tools() {
        assert_eq!(Toolset::from_label("rpki"), Some(Toolset::Roa));
        assert_eq!(Toolset::from_label("Market"), Some(Toolset::Asn));
        assert_eq!(Toolset::from_label("dns"), None);
        assert_eq!(Toolset::Asn.tools(), &[Tool::TopFourAsns, Tool::CountryAsnHhi]);
    }

    #[test]
    fn every_tool_belongs_to_exactly_one_toolset() {
        for t in Tool::ALL {
            let owners = Toolset::ALL.iter().filter(|s| s.tools().contains(&t)).count();
            assert_eq!(owners, 1, "{t}");
        }
    }

    #[test]
    fn schemas_list_required_parameters() {
        let spec = Tool::MonthlyRoaCoverage.spec();
        assert_eq!(spec.parameters["required"], json!(["country_code", "ip_family", "start_date", "end_date"]));
        let ipv6 = Tool::CountryIpv6AdoptionRate.spec();
        assert_eq!(ipv6.parameters["required"], json!(["country_code"]));
        assert_eq!(ipv6.parameters["properties"]["source"]["enum"][0], "google");
    }

    #[test]
    fn catalog_filters_by_toolset() {
        assert_eq!(catalog(None).len(), 4);
        let names: Vec<_> = catalog(Some(Toolset::Asn)).iter().map(|s| s.name).collect();
        assert_eq!(names, ["get_top_four_asns", "get_country_asn_hhi"]);
    }
}
