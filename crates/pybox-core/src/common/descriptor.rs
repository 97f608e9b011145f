//! Immutable process description for the PYBOX simulator.
//!
//! The descriptor carries every declared input (with its accepted range) and
//! every declared output. It is built once, either from the built-in
//! definition or from a JSON document, and handed to the translator and the
//! collector by reference.

use super::constants::{
    BASE_OUTPUT_FILENAME, DS_KEY, EPS0_KEY, GEOTIFF_MEDIA_TYPE, MAX_PARTICLE_CLASSES,
    MIN_PARTICLE_CLASSES, PARTICLE_CLASSES_FIELD, PROCESS_ID, PROCESS_VERSION, RHOS_KEY,
    SERIES_MEDIA_TYPE,
};
use crate::domain::{OutputName, PyboxError, PyboxResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt::{Display, Formatter};

pub const REQUIRED_SCALAR_INPUTS: [&str; 7] = ["lat", "lon", "l0", "h0", "theta0", "dt", "margin"];
pub const PARTICLE_CLASS_KEYS: [&str; 3] = [EPS0_KEY, RHOS_KEY, DS_KEY];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub minimum: f64,
    pub maximum: f64,
}

impl Bounds {
    pub const fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">={} and <={}", self.minimum, self.maximum)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarInput {
    pub name: String,
    pub title: String,
    pub description: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassField {
    pub key: String,
    pub title: String,
    pub description: String,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParticleClassInput {
    pub name: String,
    pub title: String,
    pub description: String,
    pub min_occurs: usize,
    pub max_occurs: usize,
    pub fields: Vec<ClassField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputDeclaration {
    pub name: OutputName,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProcessDescriptor {
    pub id: String,
    pub version: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub job_control_options: Vec<String>,
    pub output_transmission: Vec<String>,
    pub base_output_filename: String,
    pub inputs: Vec<ScalarInput>,
    pub particle_classes: ParticleClassInput,
    pub outputs: Vec<OutputDeclaration>,
}

impl Default for ProcessDescriptor {
    fn default() -> Self {
        Self::pybox()
    }
}

impl ProcessDescriptor {
    pub fn pybox() -> Self {
        Self {
            id: PROCESS_ID.to_string(),
            version: PROCESS_VERSION.to_string(),
            title: "PYBOX".to_string(),
            description: "Simulates the dispersal of a gravity-driven pyroclastic density \
                current (PDC) with a box model. It produces a 2D invasion area using the \
                energy conoid approach over a Digital Surface Model (DSM). Multiple \
                particle classes are supported."
                .to_string(),
            keywords: Vec::new(),
            job_control_options: vec!["async-execute".to_string(), "sync-execute".to_string()],
            output_transmission: vec!["value".to_string()],
            base_output_filename: BASE_OUTPUT_FILENAME.to_string(),
            inputs: vec![
                scalar(
                    "lat",
                    "Latitude",
                    "Geographic latitude of the vent in decimal degrees",
                    Bounds::new(-90.0, 90.0),
                ),
                scalar(
                    "lon",
                    "Longitude",
                    "Geographic longitude of the vent in decimal degrees",
                    Bounds::new(-180.0, 180.0),
                ),
                scalar(
                    "l0",
                    "Initial radius",
                    "Initial horizontal extent (l0) of the current in meters",
                    Bounds::new(100.0, 2000.0),
                ),
                scalar(
                    "h0",
                    "Initial height",
                    "Initial vertical thickness (h0) of the current in meters",
                    Bounds::new(100.0, 2000.0),
                ),
                scalar(
                    "theta0",
                    "Temperature",
                    "Initial temperature of the current in Kelvin",
                    Bounds::new(300.0, 1400.0),
                ),
                scalar(
                    "dt",
                    "Time step",
                    "Temporal resolution of the numerical integration in seconds",
                    Bounds::new(0.1, 30.0),
                ),
                scalar(
                    "margin",
                    "Margin",
                    "-x, -y, x, y distance from the vent location (bounding box of the \
                     requested DSM) in meters",
                    Bounds::new(5000.0, 50000.0),
                ),
            ],
            particle_classes: ParticleClassInput {
                name: PARTICLE_CLASSES_FIELD.to_string(),
                title: "Particle classes".to_string(),
                description: "Volume fraction (eps0), density (rhos) and diameter (ds) of \
                    each simulated particle class; the sum of eps0 must be < 1"
                    .to_string(),
                min_occurs: MIN_PARTICLE_CLASSES,
                max_occurs: MAX_PARTICLE_CLASSES,
                fields: vec![
                    ClassField {
                        key: EPS0_KEY.to_string(),
                        title: "Particle volume fraction".to_string(),
                        description: "Volume fraction of particle class".to_string(),
                        bounds: Bounds::new(0.001, 0.1),
                    },
                    ClassField {
                        key: RHOS_KEY.to_string(),
                        title: "Particle density".to_string(),
                        description: "Density of particle class in kg/m3".to_string(),
                        bounds: Bounds::new(500.0, 3500.0),
                    },
                    ClassField {
                        key: DS_KEY.to_string(),
                        title: "Particle diameter".to_string(),
                        description: "Diameter of particle class (10 micron-5 mm) in meters"
                            .to_string(),
                        bounds: Bounds::new(0.00001, 0.005),
                    },
                ],
            },
            outputs: vec![
                output(
                    OutputName::InputData,
                    "Input parameters",
                    "Log of all input parameters used",
                ),
                output(
                    OutputName::Dem,
                    "Primary DEM",
                    "The local DSM (GeoTIFF) used for the simulation.",
                ),
                output(
                    OutputName::InvasionMap,
                    "Invasion map",
                    "2D GeoTIFF showing the PDC invaded area, based on the energy conoid method.",
                ),
                output(
                    OutputName::TemporalEvolution,
                    "Spatial evolution of current mean properties",
                    "Spatial evolution of current mean properties.",
                ),
                output(
                    OutputName::DepositThickness,
                    "Deposit thickness",
                    "Deposit thickness left by the current with distance from vent.",
                ),
            ],
        }
    }

    pub fn from_json_str(source: &str) -> PyboxResult<Self> {
        let descriptor: Self = serde_json::from_str(source).map_err(|source| {
            PyboxError::input_validation(
                "INPUT.DESCRIPTOR_PARSE",
                format!("failed to parse process descriptor: {source}"),
            )
        })?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Rejects descriptors that drop or rename inputs the simulator needs,
    /// or that leave a declared output undeclared.
    pub fn validate(&self) -> PyboxResult<()> {
        let mut scalar_names = self
            .inputs
            .iter()
            .map(|input| input.name.as_str())
            .collect::<Vec<_>>();
        scalar_names.sort_unstable();
        let mut expected = REQUIRED_SCALAR_INPUTS.to_vec();
        expected.sort_unstable();
        if scalar_names != expected {
            return Err(descriptor_error(format!(
                "scalar inputs must be exactly {}, got {}",
                REQUIRED_SCALAR_INPUTS.join(", "),
                scalar_names.join(", ")
            )));
        }

        if self.particle_classes.name != PARTICLE_CLASSES_FIELD {
            return Err(descriptor_error(format!(
                "particle class input must be named '{PARTICLE_CLASSES_FIELD}', got '{}'",
                self.particle_classes.name
            )));
        }

        let class_keys = self
            .particle_classes
            .fields
            .iter()
            .map(|field| field.key.as_str())
            .collect::<Vec<_>>();
        if class_keys != PARTICLE_CLASS_KEYS {
            return Err(descriptor_error(format!(
                "particle class fields must be {} in that order, got {}",
                PARTICLE_CLASS_KEYS.join(", "),
                class_keys.join(", ")
            )));
        }

        let occurs = &self.particle_classes;
        if occurs.min_occurs == 0 || occurs.min_occurs > occurs.max_occurs {
            return Err(descriptor_error(format!(
                "particle class occurrences must satisfy 1 <= min <= max, got {}..{}",
                occurs.min_occurs, occurs.max_occurs
            )));
        }

        let all_bounds = self
            .inputs
            .iter()
            .map(|input| (input.name.as_str(), input.bounds))
            .chain(
                self.particle_classes
                    .fields
                    .iter()
                    .map(|field| (field.key.as_str(), field.bounds)),
            );
        for (name, bounds) in all_bounds {
            if !(bounds.minimum.is_finite()
                && bounds.maximum.is_finite()
                && bounds.minimum <= bounds.maximum)
            {
                return Err(descriptor_error(format!(
                    "bounds of '{name}' are not a finite range: {bounds}"
                )));
            }
        }

        let missing_outputs = OutputName::ALL
            .into_iter()
            .filter(|name| !self.outputs.iter().any(|output| output.name == *name))
            .map(OutputName::as_str)
            .collect::<Vec<_>>();
        if !missing_outputs.is_empty() {
            return Err(descriptor_error(format!(
                "outputs must declare {}",
                missing_outputs.join(", ")
            )));
        }

        let base = self.base_output_filename.as_str();
        if base.is_empty() || base.contains(['/', '\\']) {
            return Err(descriptor_error(format!(
                "base output filename must be a bare file stem, got '{base}'"
            )));
        }

        Ok(())
    }

    pub fn output_names(&self) -> Vec<OutputName> {
        OutputName::ALL
            .into_iter()
            .filter(|name| self.outputs.iter().any(|output| output.name == *name))
            .collect()
    }

    /// Top-level request fields, scalars first and the particle class list last.
    pub fn required_fields(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .map(|input| input.name.as_str())
            .chain(std::iter::once(self.particle_classes.name.as_str()))
            .collect()
    }

    /// Process description document in the OGC API - Processes layout.
    pub fn describe(&self) -> Value {
        let mut inputs = Map::new();
        for input in &self.inputs {
            inputs.insert(
                input.name.clone(),
                json!({
                    "title": input.title,
                    "description": input.description,
                    "minOccurs": 1,
                    "maxOccurs": 1,
                    "schema": number_schema(input.bounds),
                }),
            );
        }

        let class_properties = self
            .particle_classes
            .fields
            .iter()
            .map(|field| {
                let mut schema = number_schema(field.bounds);
                if let Value::Object(properties) = &mut schema {
                    properties.insert("title".to_string(), json!(field.title));
                    properties.insert("description".to_string(), json!(field.description));
                }
                (field.key.clone(), schema)
            })
            .collect::<Map<_, _>>();
        inputs.insert(
            self.particle_classes.name.clone(),
            json!({
                "title": self.particle_classes.title,
                "description": self.particle_classes.description,
                "minOccurs": self.particle_classes.min_occurs,
                "maxOccurs": self.particle_classes.max_occurs,
                "schema": {
                    "type": "object",
                    "required": PARTICLE_CLASS_KEYS,
                    "properties": class_properties,
                },
            }),
        );

        let outputs = self
            .outputs
            .iter()
            .map(|output| {
                (
                    output.name.as_str().to_string(),
                    json!({
                        "title": output.title,
                        "description": output.description,
                        "schema": output_schema(output.name),
                    }),
                )
            })
            .collect::<Map<_, _>>();

        json!({
            "id": self.id,
            "version": self.version,
            "title": self.title,
            "description": self.description,
            "keywords": self.keywords,
            "jobControlOptions": self.job_control_options,
            "outputTransmission": self.output_transmission,
            "inputs": inputs,
            "outputs": outputs,
        })
    }
}

fn scalar(name: &str, title: &str, description: &str, bounds: Bounds) -> ScalarInput {
    ScalarInput {
        name: name.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        bounds,
    }
}

fn output(name: OutputName, title: &str, description: &str) -> OutputDeclaration {
    OutputDeclaration {
        name,
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn descriptor_error(message: String) -> PyboxError {
    PyboxError::input_validation("INPUT.DESCRIPTOR", message)
}

fn number_schema(bounds: Bounds) -> Value {
    json!({
        "type": "number",
        "minimum": bounds.minimum,
        "maximum": bounds.maximum,
    })
}

fn output_schema(name: OutputName) -> Value {
    match name {
        OutputName::InputData => json!({ "type": "string" }),
        OutputName::Dem | OutputName::InvasionMap => json!({
            "type": "string",
            "contentEncoding": "binary",
            "contentMediaType": GEOTIFF_MEDIA_TYPE,
        }),
        OutputName::TemporalEvolution | OutputName::DepositThickness => {
            let column = json!({
                "type": "object",
                "required": ["label", "unit", "values"],
                "properties": {
                    "label": { "type": "string" },
                    "unit": { "type": "string" },
                    "description": { "type": "string" },
                    "values": { "type": "array", "items": { "type": "number" } },
                },
            });
            json!({
                "contentMediaType": SERIES_MEDIA_TYPE,
                "type": "object",
                "required": ["Domain", "Series"],
                "properties": {
                    "Domain": column,
                    "Series": { "type": "array", "items": column },
                },
            })
        }
    }
}
