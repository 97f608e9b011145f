use serde_json::Number;

/// A request number kept in both forms: the JSON number as written for
/// rendering and its `f64` value for range checks.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct NumericField {
    pub(super) raw: Number,
    pub(super) value: f64,
}

impl NumericField {
    pub(super) fn from_number(raw: &Number) -> Option<Self> {
        let value = raw.as_f64()?;
        value.is_finite().then(|| Self {
            raw: raw.clone(),
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ParticleClass {
    pub(super) eps0: NumericField,
    pub(super) rhos: NumericField,
    pub(super) ds: NumericField,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ScalarParameter {
    pub(super) name: String,
    pub(super) value: NumericField,
}
