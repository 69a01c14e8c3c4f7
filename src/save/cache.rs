use super::encoding::Encoding;
use super::results;
use crate::evaluation::cache::EvaluationCache;
use crate::evaluation::evaluation::Evaluation;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use serde_json::Value;
use serde_json::json;

/// opaque text payload: an ordered list of
/// `[canonicalKey, minimumResults, exactResults]` triples, Results
/// encoded per the chosen flag set. raw and compact payloads are not
/// auto-detected; the reader must match the writer.
pub fn encode(cache: &EvaluationCache, encoding: Encoding) -> String {
    cache
        .entries()
        .map(|(key, evaluation)| {
            json!([
                key,
                results::encode(evaluation.minimum(), encoding),
                results::encode(evaluation.exact(), encoding),
            ])
        })
        .collect::<Value>()
        .to_string()
}

pub fn decode(payload: &str, encoding: Encoding) -> Result<EvaluationCache> {
    let value: Value = serde_json::from_str(payload).context("cache payload is not json")?;
    let rows = value.as_array().context("cache payload is not a list")?;
    let mut cache = EvaluationCache::new();
    for row in rows {
        let row = row.as_array().context("cache row is not a list")?;
        let [key, minimum, exact] = row.as_slice() else {
            bail!("cache row is not a triple: {:?}", row);
        };
        let key = key.as_str().context("cache key is not a string")?;
        let minimum = results::decode(minimum, encoding).context("minimum view")?;
        let exact = results::decode(exact, encoding).context("exact view")?;
        cache.set(key.to_string(), Evaluation::from((minimum, exact)));
    }
    Ok(cache)
}
