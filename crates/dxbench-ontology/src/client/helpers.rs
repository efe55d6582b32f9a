//! Pure helpers: name normalization, URL building, payload extraction (no HTTP).

use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::{OntologyError, OntologyResult};
use crate::types::OrphaDisease;

/// Dataset labels use `_` for spaces.
pub(crate) fn normalize_name(name: &str) -> String {
    name.replace('_', " ").trim().to_string()
}

/// `{base}/rd-cross-referencing/orphacodes/names/{name}?lang={lang}`, with
/// `name` percent-encoded as a single path segment.
pub(crate) fn lookup_url(base: &str, name: &str, lang: &str) -> OntologyResult<Url> {
    let mut url = Url::parse(base.trim_end_matches('/')).map_err(|e| OntologyError::Config {
        message: format!("invalid Orphadata URL {:?}: {}", base, e),
    })?;
    url.path_segments_mut()
        .map_err(|()| OntologyError::Config {
            message: format!("Orphadata URL {:?} cannot have a path", base),
        })?
        .pop_if_empty()
        .extend(["rd-cross-referencing", "orphacodes", "names"])
        .push(name);
    url.query_pairs_mut().append_pair("lang", lang);
    Ok(url)
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}

fn definition_of(item: &Value) -> Option<String> {
    item.get("Definition")
        .filter(|d| !is_blank(d))
        .map(scalar_text)
}

fn parse_orphacode(raw: Option<&Value>) -> OntologyResult<i64> {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| OntologyError::InvalidResponse {
        message: format!("could not parse ORPHAcode: {}", raw.unwrap_or(&Value::Null)),
    })
}

/// Turn a 200 payload into a record. `data.results` may be an object or a
/// list (first entry wins); null or missing means no match.
pub(crate) fn parse_disease(name: &str, payload: &Value) -> OntologyResult<Option<OrphaDisease>> {
    let best = match payload.pointer("/data/results") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => match items.first() {
            Some(first) => first,
            None => return Ok(None),
        },
        Some(obj @ Value::Object(_)) => obj,
        Some(other) => {
            warn!(label = name, kind = json_kind(other), "unexpected `results` type, treating as no match");
            return Ok(None);
        }
    };
    if !best.is_object() {
        return Err(OntologyError::InvalidResponse {
            message: format!("result entry for {:?} is not an object", name),
        });
    }

    let orphacode = parse_orphacode(best.get("ORPHAcode"))?;

    let preferred_term = best
        .get("Preferred term")
        .filter(|v| !is_blank(v))
        .map(scalar_text)
        .unwrap_or_default();

    let orphanet_url = best
        .get("OrphanetURL")
        .filter(|v| !is_blank(v))
        .map(scalar_text);

    let synonyms = match best.get("Synonym") {
        Some(v) if is_blank(v) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        Some(scalar) => vec![scalar_text(scalar)],
        None => Vec::new(),
    }
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();

    let definition = match best.get("SummaryInformation") {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|i| i.is_object())
            .find_map(definition_of),
        Some(obj @ Value::Object(_)) => definition_of(obj),
        _ => None,
    };

    Ok(Some(OrphaDisease {
        preferred_term,
        orphacode,
        definition,
        orphanet_url,
        synonyms,
    }))
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
