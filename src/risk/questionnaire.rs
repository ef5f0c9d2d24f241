use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::RiskError;

/// Questionnaire answers in whatever shape the caller received them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuestionnaire {
    /// Answers already in question order
    Sequence(Vec<Value>),
    /// Question id -> answer
    Mapping(Map<String, Value>),
}

impl From<Vec<i64>> for RawQuestionnaire {
    fn from(answers: Vec<i64>) -> Self {
        RawQuestionnaire::Sequence(answers.into_iter().map(Value::from).collect())
    }
}

/// Produce the canonical ordered answer list.
///
/// Mappings are ordered by question id (see [`QuestionKey`]). Answers may be
/// JSON integers, integral floats, or integer strings.
pub fn normalize_questionnaire(raw: &RawQuestionnaire) -> Result<Vec<i64>, RiskError> {
    match raw {
        RawQuestionnaire::Sequence(values) => values
            .iter()
            .enumerate()
            .map(|(i, v)| coerce_answer(&(i + 1).to_string(), v))
            .collect(),
        RawQuestionnaire::Mapping(entries) => {
            let mut keyed: Vec<(QuestionKey, &String, &Value)> = entries
                .iter()
                .map(|(k, v)| (QuestionKey::parse(k), k, v))
                .collect();
            keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
            keyed
                .into_iter()
                .map(|(_, k, v)| coerce_answer(k, v))
                .collect()
        }
    }
}

fn coerce_answer(question: &str, value: &Value) -> Result<i64, RiskError> {
    let coerced = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    coerced.ok_or_else(|| RiskError::NonNumericAnswer {
        question: question.to_string(),
        value: value.to_string(),
    })
}

/// Sort key for question ids.
///
/// Pure integers sort first and numerically, then ids with a numeric suffix
/// (`q2` before `q10`), then everything else lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
enum QuestionKey {
    Numeric(i64),
    Suffixed(String, u64),
    Text(String),
}

impl QuestionKey {
    fn parse(key: &str) -> Self {
        let key = key.trim();
        if let Ok(n) = key.parse::<i64>() {
            return QuestionKey::Numeric(n);
        }

        let prefix = key.trim_end_matches(|c: char| c.is_ascii_digit());
        match key[prefix.len()..].parse::<u64>() {
            Ok(n) if !prefix.is_empty() => QuestionKey::Suffixed(prefix.to_string(), n),
            _ => QuestionKey::Text(key.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            QuestionKey::Numeric(_) => 0,
            QuestionKey::Suffixed(..) => 1,
            QuestionKey::Text(_) => 2,
        }
    }
}

impl Ord for QuestionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (QuestionKey::Numeric(a), QuestionKey::Numeric(b)) => a.cmp(b),
            (QuestionKey::Suffixed(pa, a), QuestionKey::Suffixed(pb, b)) => {
                pa.cmp(pb).then(a.cmp(b))
            }
            (QuestionKey::Text(a), QuestionKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for QuestionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawQuestionnaire {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn sequence_passes_through_unchanged() {
        let answers = vec![1, 2, 3, 4, 5, 4, 3, 2];
        let normalized = normalize_questionnaire(&answers.clone().into()).unwrap();
        assert_eq!(normalized, answers);
    }

    #[test]
    fn mapping_is_ordered_numerically_not_lexically() {
        let q = raw(json!({"10": 1, "2": 4, "1": 5, "3": 2}));
        assert!(matches!(q, RawQuestionnaire::Mapping(_)));
        assert_eq!(normalize_questionnaire(&q).unwrap(), vec![5, 4, 2, 1]);
    }

    #[test]
    fn prefixed_ids_order_by_suffix() {
        let q = raw(json!({"q10": 1, "q2": 3, "q1": 5}));
        assert_eq!(normalize_questionnaire(&q).unwrap(), vec![5, 3, 1]);
    }

    #[test]
    fn numeric_strings_and_integral_floats_coerce() {
        let q = raw(json!(["3", 4.0, " 2 ", 1]));
        assert_eq!(normalize_questionnaire(&q).unwrap(), vec![3, 4, 2, 1]);
    }

    #[test]
    fn non_numeric_answer_is_rejected() {
        let q = raw(json!([3, "often", 2]));
        let err = normalize_questionnaire(&q).unwrap_err();
        assert_eq!(
            err,
            RiskError::NonNumericAnswer {
                question: "2".into(),
                value: "\"often\"".into()
            }
        );

        let q = raw(json!({"1": 3, "2": 2.5}));
        assert!(matches!(
            normalize_questionnaire(&q),
            Err(RiskError::NonNumericAnswer { .. })
        ));

        let q = raw(json!([null]));
        assert!(normalize_questionnaire(&q).is_err());
    }

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(normalize_questionnaire(&raw(json!([]))).unwrap(), Vec::<i64>::new());
        assert_eq!(normalize_questionnaire(&raw(json!({}))).unwrap(), Vec::<i64>::new());
    }
}
