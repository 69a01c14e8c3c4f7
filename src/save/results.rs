use super::encoding::Encoding;
use crate::Probability;
use crate::Total;
use crate::evaluation::results::Results;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use serde_json::Value;
use serde_json::json;

/// literal pairs `[total, weight]`, or run-length triples
/// `[min, max, weight]` over maximal runs of consecutive totals
/// carrying equal weight. weights are raw floats or fixed-point
/// integers depending on the flag set; rounding happens before run
/// detection so near-equal masses compress together.
pub fn encode(results: &Results, encoding: Encoding) -> Value {
    match (encoding.rounded, encoding.compressed) {
        (true, true) => spans(results.support().map(|(t, m)| (t, Encoding::quantize(m))))
            .into_iter()
            .map(|(min, max, w)| json!([min, max, w]))
            .collect(),
        (true, false) => results
            .support()
            .map(|(t, m)| json!([t, Encoding::quantize(m)]))
            .collect(),
        (false, true) => spans(results.support())
            .into_iter()
            .map(|(min, max, w)| json!([min, max, w]))
            .collect(),
        (false, false) => results.support().map(|(t, m)| json!([t, m])).collect(),
    }
}

pub fn decode(value: &Value, encoding: Encoding) -> Result<Results> {
    let rows = value.as_array().context("results payload is not a list")?;
    let mut results = Results::empty();
    for row in rows {
        let row = row.as_array().context("results entry is not a list")?;
        if encoding.compressed {
            let [min, max, mass] = row.as_slice() else {
                bail!("run entry is not a triple: {:?}", row);
            };
            let min = total(min)?;
            let max = total(max)?;
            if min > max {
                bail!("inverted run: {}..{}", min, max);
            }
            let mass = mass_of(mass, encoding)?;
            for t in min..=max {
                results.set(t, mass);
            }
        } else {
            let [t, mass] = row.as_slice() else {
                bail!("literal entry is not a pair: {:?}", row);
            };
            results.set(total(t)?, mass_of(mass, encoding)?);
        }
    }
    Ok(results)
}

/// collapse (total, weight) pairs ascending by total into maximal
/// runs of consecutive totals with equal weight
fn spans<T, I>(pairs: I) -> Vec<(Total, Total, T)>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = (Total, T)>,
{
    let mut spans: Vec<(Total, Total, T)> = vec![];
    for (total, weight) in pairs {
        match spans.last_mut() {
            Some((_, max, value)) if *value == weight && *max + 1 == total => *max = total,
            _ => spans.push((total, total, weight)),
        }
    }
    spans
}

fn total(value: &Value) -> Result<Total> {
    value
        .as_u64()
        .and_then(|n| Total::try_from(n).ok())
        .ok_or_else(|| anyhow!("unparsable total: {}", value))
}

/// weights are non-negative; the only negative wire value is the 1.0
/// sentinel in fixed-point mode
fn mass_of(value: &Value, encoding: Encoding) -> Result<Probability> {
    if encoding.rounded {
        let wire = value
            .as_i64()
            .ok_or_else(|| anyhow!("unparsable fixed-point mass: {}", value))?;
        if wire < 0 && wire != crate::WIRE_ONE {
            bail!("negative fixed-point mass: {}", wire);
        }
        Ok(Encoding::dequantize(wire))
    } else {
        let mass = value
            .as_f64()
            .ok_or_else(|| anyhow!("unparsable mass: {}", value))?;
        if mass < 0.0 {
            bail!("negative mass: {}", mass);
        }
        Ok(mass)
    }
}
