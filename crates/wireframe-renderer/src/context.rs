use std::collections::BTreeMap;

use tera::{Context, Value};

/// Build a Tera context from a map of variable names to values.
pub fn build_context(variables: &BTreeMap<String, Value>) -> Context {
    let mut context = Context::new();
    for (key, value) in variables {
        context.insert(key, value);
    }
    context
}

/// Parse `KEY=VALUE` pairs into context variables.
///
/// Values that parse as JSON (numbers, booleans, arrays, objects) keep their
/// type; anything else is inserted as a plain string. Pairs without `=` are skipped.
pub fn parse_data_pairs<I, S>(pairs: I) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .filter_map(|kv| {
            let (key, raw) = kv.as_ref().split_once('=')?;
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            Some((key.to_string(), value))
        })
        .collect()
}
