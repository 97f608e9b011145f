pub mod errors;

pub use errors::{CollectResult, PyboxError, PyboxErrorCategory, PyboxResult, ValidationResult};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputName {
    InputData,
    Dem,
    InvasionMap,
    TemporalEvolution,
    DepositThickness,
}

impl OutputName {
    pub const ALL: [OutputName; 5] = [
        Self::InputData,
        Self::Dem,
        Self::InvasionMap,
        Self::TemporalEvolution,
        Self::DepositThickness,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputData => "input_data",
            Self::Dem => "dem",
            Self::InvasionMap => "invasion_map",
            Self::TemporalEvolution => "temporal_evolution",
            Self::DepositThickness => "deposit_thickness",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|output| output.as_str() == name)
    }

    /// Suffix appended to the base output filename for the file backing
    /// this output.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::InputData => "_params.txt",
            Self::Dem => ".tif",
            Self::InvasionMap => "_EC2.tif",
            Self::TemporalEvolution => ".csv",
            Self::DepositThickness => "_thickness.csv",
        }
    }
}

impl Display for OutputName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Output names chosen by the caller. Names are kept verbatim until they
/// are resolved against the declared outputs, so unknown names can be
/// reported back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestedOutputs {
    names: Vec<String>,
}

impl RequestedOutputs {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requested = Self::default();
        for name in names {
            let name = name.into();
            if !requested.names.contains(&name) {
                requested.names.push(name);
            }
        }
        requested
    }

    /// Accepts either an array of names or an object keyed by output name
    /// (`{"dem": {"transmissionMode": "value"}}`). `null` requests everything.
    pub fn from_json(value: &Value) -> PyboxResult<Self> {
        match value {
            Value::Null => Ok(Self::all()),
            Value::Object(map) => Ok(Self::from_names(map.keys().cloned())),
            Value::Array(items) => {
                let names = items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_owned).ok_or_else(|| {
                            PyboxError::input_validation(
                                "INPUT.OUTPUTS_SHAPE",
                                format!("Outputs entry {item} is not an output name."),
                            )
                        })
                    })
                    .collect::<PyboxResult<Vec<_>>>()?;
                Ok(Self::from_names(names))
            }
            other => Err(PyboxError::input_validation(
                "INPUT.OUTPUTS_SHAPE",
                format!("Outputs must be an array or an object, got {other}."),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Maps the requested names onto `declared`, keeping the declared order.
    /// An empty request selects every declared output.
    pub fn resolve(&self, declared: &[OutputName]) -> PyboxResult<Vec<OutputName>> {
        if self.names.is_empty() {
            return Ok(declared.to_vec());
        }

        let unexpected = self
            .names
            .iter()
            .filter(|name| {
                !OutputName::from_name(name).is_some_and(|output| declared.contains(&output))
            })
            .map(String::as_str)
            .collect::<Vec<_>>();
        if !unexpected.is_empty() {
            return Err(PyboxError::input_validation(
                "INPUT.UNEXPECTED_OUTPUT",
                format!(
                    "Outputs contains unexpected parameters: {}.",
                    unexpected.join(", ")
                ),
            ));
        }

        Ok(declared
            .iter()
            .copied()
            .filter(|output| self.names.iter().any(|name| name == output.as_str()))
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Number(Number),
}

impl Display for ArgValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => number.serialize(serializer),
        }
    }
}

/// Flag to value arguments for one simulator run, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentMap {
    entries: Vec<(String, ArgValue)>,
}

impl ArgumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `flag`, replacing the value in place when the flag exists.
    pub fn insert(&mut self, flag: impl Into<String>, value: ArgValue) {
        let flag = flag.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == flag) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((flag, value)),
        }
    }

    pub fn get(&self, flag: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == flag)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(flag, _)| flag.as_str())
    }

    /// Flattens the map into `flag value` pairs for the process launcher.
    pub fn to_command_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(flag, value)| [flag.clone(), value.to_string()])
            .collect()
    }
}

impl Serialize for ArgumentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (flag, value) in &self.entries {
            map.serialize_entry(flag, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesColumn {
    pub label: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<f64>,
}

impl SeriesColumn {
    pub fn new(
        label: impl Into<String>,
        unit: impl Into<String>,
        description: Option<String>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            label: label.into(),
            unit: unit.into(),
            description,
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTable {
    #[serde(rename = "Domain")]
    pub domain: SeriesColumn,
    #[serde(rename = "Series")]
    pub series: Vec<SeriesColumn>,
}

impl SeriesTable {
    pub fn row_count(&self) -> usize {
        self.domain.values.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArtifactValue {
    Text(String),
    Table(SeriesTable),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputArtifact {
    pub value: ArtifactValue,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl OutputArtifact {
    pub fn text(value: String, media_type: &str) -> Self {
        Self {
            value: ArtifactValue::Text(value),
            media_type: media_type.to_owned(),
            encoding: None,
        }
    }

    pub fn encoded(value: String, media_type: &str, encoding: &str) -> Self {
        Self {
            value: ArtifactValue::Text(value),
            media_type: media_type.to_owned(),
            encoding: Some(encoding.to_owned()),
        }
    }

    pub fn table(value: SeriesTable, media_type: &str) -> Self {
        Self {
            value: ArtifactValue::Table(value),
            media_type: media_type.to_owned(),
            encoding: None,
        }
    }
}

pub type OutputArtifactMap = BTreeMap<OutputName, OutputArtifact>;
