use super::encoding::Encoding;
use super::results;
use crate::evaluation::evaluation::Evaluation;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use serde_json::Value;
use serde_json::json;

/// two parallel Results payloads, `[minimum, exact]`. the conditional
/// view and the scalar expectation are re-derived on decode.
pub fn encode(evaluation: &Evaluation, encoding: Encoding) -> Value {
    json!([
        results::encode(evaluation.minimum(), encoding),
        results::encode(evaluation.exact(), encoding),
    ])
}

pub fn decode(value: &Value, encoding: Encoding) -> Result<Evaluation> {
    let rows = value.as_array().context("evaluation payload is not a list")?;
    let [minimum, exact] = rows.as_slice() else {
        bail!("evaluation payload is not a pair of lists");
    };
    let minimum = results::decode(minimum, encoding).context("minimum view")?;
    let exact = results::decode(exact, encoding).context("exact view")?;
    Ok(Evaluation::from((minimum, exact)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_outcomes_round_trip() {
        for total in [0, 5, 13] {
            let evaluation = Evaluation::from(total);
            for encoding in [Encoding::RAW, Encoding::COMPACT] {
                let wire = encode(&evaluation, encoding);
                assert_eq!(decode(&wire, encoding).unwrap(), evaluation);
            }
        }
    }

    #[test]
    fn views_survive_independently() {
        let branches = [(1, Evaluation::from(2)), (1, Evaluation::from(4))];
        let evaluation = Evaluation::combine_probabilities(branches.iter().map(|(w, e)| (*w, e)));
        let wire = encode(&evaluation, Encoding::RAW);
        let rebuilt = decode(&wire, Encoding::RAW).unwrap();
        assert_eq!(rebuilt.minimum(), evaluation.minimum());
        assert_eq!(rebuilt.exact(), evaluation.exact());
        assert!((rebuilt.expectation() - evaluation.expectation()).abs() < 1e-12);
    }

    #[test]
    fn malformed_payloads_fail() {
        assert!(decode(&json!([[]]), Encoding::RAW).is_err());
        assert!(decode(&json!({"minimum": []}), Encoding::RAW).is_err());
    }
}
