use crate::catalog::Tool;
use crate::ops;
use insights_core::Outcome;
use insights_sqlite::{Ipv6Filter, Store};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: Tool,
        #[source]
        source: serde_json::Error,
    },
}

/// Function-calling runtimes sometimes send `4` where `"4"` is declared.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        S(String),
        N(serde_json::Number),
    }
    Ok(match Raw::deserialize(d)? {
        Raw::S(s) => s,
        Raw::N(n) => n.to_string(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoaArgs {
    country_code: String,
    #[serde(deserialize_with = "string_or_number")]
    ip_family: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CountryArgs {
    country_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Ipv6Args {
    country_code: String,
    source: Option<String>,
    specific_date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

fn parse<T: DeserializeOwned>(tool: Tool, args: Value) -> Result<T, DispatchError> {
    // A runtime that omits arguments entirely sends null.
    let args = if args.is_null() { Value::Object(Default::default()) } else { args };
    serde_json::from_value(args).map_err(|source| DispatchError::InvalidArguments { tool, source })
}

fn envelope<T: Serialize>(outcome: Outcome<T>) -> Value {
    serde_json::to_value(&outcome).unwrap_or_else(|e| {
        serde_json::to_value(Outcome::<()>::failure(format!("cannot encode result: {e}"))).unwrap_or(Value::Null)
    })
}

fn rejected(err: DispatchError) -> Value {
    tracing::warn!(error = %err, "tool call rejected");
    envelope(Outcome::<()>::failure(err.to_string()))
}

/// Run the tool called `name` with a JSON argument object and return its
/// envelope. Unknown names and malformed arguments also come back as error
/// envelopes.
pub fn invoke(store: &Store, name: &str, args: Value) -> Value {
    let tool = match name.parse::<Tool>() {
        Ok(t) => t,
        Err(_) => return rejected(DispatchError::UnknownTool(name.to_string())),
    };
    tracing::debug!(%tool, %args, "tool call");
    match tool {
        Tool::MonthlyRoaCoverage => match parse::<RoaArgs>(tool, args) {
            Ok(a) => envelope(ops::monthly_roa_coverage(store, &a.country_code, &a.ip_family, &a.start_date, &a.end_date)),
            Err(e) => rejected(e),
        },
        Tool::TopFourAsns => match parse::<CountryArgs>(tool, args) {
            Ok(a) => envelope(ops::top_four_asns(store, &a.country_code)),
            Err(e) => rejected(e),
        },
        Tool::CountryAsnHhi => match parse::<CountryArgs>(tool, args) {
            Ok(a) => envelope(ops::country_asn_hhi(store, &a.country_code)),
            Err(e) => rejected(e),
        },
        Tool::CountryIpv6AdoptionRate => match parse::<Ipv6Args>(tool, args) {
            Ok(a) => {
                let filter = Ipv6Filter { source: a.source, specific_date: a.specific_date, start_date: a.start_date, end_date: a.end_date };
                envelope(ops::country_ipv6_adoption_rate(store, &a.country_code, &filter))
            }
            Err(e) => rejected(e),
        },
    }
}
