use super::model::{NumericField, ParticleClass, ScalarParameter};
use crate::common::ProcessDescriptor;
use crate::common::constants::EPS0_SUM_LIMIT;
use crate::domain::{PyboxError, RequestedOutputs, ValidationResult};
use serde_json::{Map, Value};

pub(super) fn check_requested_outputs(
    descriptor: &ProcessDescriptor,
    requested: &RequestedOutputs,
) -> ValidationResult<()> {
    requested.resolve(&descriptor.output_names()).map(|_| ())
}

pub(super) fn request_object(request: &Value) -> ValidationResult<&Map<String, Value>> {
    request.as_object().ok_or_else(|| {
        PyboxError::input_validation(
            "INPUT.REQUEST_SHAPE",
            format!("Input must be an object of named parameters, got {request}."),
        )
    })
}

pub(super) fn check_field_set(
    descriptor: &ProcessDescriptor,
    request: &Map<String, Value>,
) -> ValidationResult<()> {
    let required = descriptor.required_fields();

    let missing = required
        .iter()
        .copied()
        .filter(|name| !request.contains_key(*name))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(PyboxError::input_validation(
            "INPUT.INCOMPLETE_PARAMETERS",
            format!(
                "Input does not contain all required parameters: missing {}.",
                missing.join(", ")
            ),
        ));
    }

    let unexpected = request
        .keys()
        .map(String::as_str)
        .filter(|name| !required.contains(name))
        .collect::<Vec<_>>();
    if !unexpected.is_empty() {
        return Err(PyboxError::input_validation(
            "INPUT.UNEXPECTED_PARAMETERS",
            format!(
                "Input contains unexpected parameters: {}.",
                unexpected.join(", ")
            ),
        ));
    }

    Ok(())
}

pub(super) fn particle_class_list<'a>(
    descriptor: &ProcessDescriptor,
    request: &'a Map<String, Value>,
) -> ValidationResult<&'a [Value]> {
    let name = &descriptor.particle_classes.name;
    match request.get(name) {
        Some(Value::Array(classes)) => Ok(classes.as_slice()),
        Some(other) => Err(PyboxError::input_validation(
            "INPUT.PARTICLE_CLASSES_SHAPE",
            format!("Input {name} must be a list of particle classes, got {other}."),
        )),
        None => Err(PyboxError::input_validation(
            "INPUT.INCOMPLETE_PARAMETERS",
            format!("Input does not contain all required parameters: missing {name}."),
        )),
    }
}

pub(super) fn check_particle_class_count(
    descriptor: &ProcessDescriptor,
    classes: &[Value],
) -> ValidationResult<()> {
    let limits = &descriptor.particle_classes;
    if classes.len() > limits.max_occurs {
        return Err(PyboxError::input_validation(
            "INPUT.TOO_MANY_PARTICLE_CLASSES",
            format!(
                "Input contains too many particle classes: max {}.",
                limits.max_occurs
            ),
        ));
    }
    if classes.len() < limits.min_occurs {
        return Err(PyboxError::input_validation(
            "INPUT.TOO_FEW_PARTICLE_CLASSES",
            format!(
                "Input contains too few particle classes: min {}.",
                limits.min_occurs
            ),
        ));
    }
    Ok(())
}

/// Checks every class in order, and within a class each declared field in
/// order. The first problem aborts with the 1-based class position.
pub(super) fn check_particle_classes(
    descriptor: &ProcessDescriptor,
    classes: &[Value],
) -> ValidationResult<Vec<ParticleClass>> {
    let list_name = &descriptor.particle_classes.name;
    let mut checked = Vec::with_capacity(classes.len());

    for (index, entry) in classes.iter().enumerate() {
        let position = index + 1;
        let Value::Object(record) = entry else {
            return Err(PyboxError::input_validation(
                "INPUT.PARTICLE_CLASS_SHAPE",
                format!("In {list_name}, item number {position} is not an object."),
            ));
        };

        let mut values = Vec::with_capacity(descriptor.particle_classes.fields.len());
        for field in &descriptor.particle_classes.fields {
            let key = &field.key;
            let raw = record.get(key).ok_or_else(|| {
                PyboxError::input_validation(
                    "INPUT.PARTICLE_CLASS_KEY",
                    format!(
                        "In {list_name}, item number {position} does not contain the key '{key}'."
                    ),
                )
            })?;
            let numeric = numeric_value(raw).ok_or_else(|| {
                PyboxError::input_validation(
                    "INPUT.PARTICLE_CLASS_VALUE",
                    format!("In {list_name}, item number {position} of {key}: must be a number."),
                )
            })?;
            if !field.bounds.contains(numeric.value) {
                return Err(PyboxError::input_validation(
                    "INPUT.PARTICLE_CLASS_RANGE",
                    format!(
                        "In {list_name}, item number {position} of {key}: must be {}.",
                        field.bounds
                    ),
                ));
            }
            values.push(numeric);
        }

        let [eps0, rhos, ds]: [NumericField; 3] = values.try_into().map_err(|_| {
            PyboxError::internal(
                "SYS.PARTICLE_CLASS_FIELDS",
                "particle class declaration must list eps0, rhos and ds",
            )
        })?;
        checked.push(ParticleClass { eps0, rhos, ds });
    }

    Ok(checked)
}

/// Neumaier compensated summation: ten times 0.1 totals exactly 1.0.
fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let next = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - next) + value;
        } else {
            compensation += (value - next) + sum;
        }
        sum = next;
    }
    sum + compensation
}

pub(super) fn check_eps0_sum(
    descriptor: &ProcessDescriptor,
    classes: &[ParticleClass],
) -> ValidationResult<()> {
    let total = compensated_sum(classes.iter().map(|class| class.eps0.value));
    if total >= EPS0_SUM_LIMIT {
        return Err(PyboxError::input_validation(
            "INPUT.EPS0_SUM",
            format!(
                "In {}, the sum of eps0 must be < {EPS0_SUM_LIMIT} (got {total}).",
                descriptor.particle_classes.name
            ),
        ));
    }
    Ok(())
}

/// Range-checks the scalar inputs in declaration order.
pub(super) fn check_scalar_ranges(
    descriptor: &ProcessDescriptor,
    request: &Map<String, Value>,
) -> ValidationResult<Vec<ScalarParameter>> {
    descriptor
        .inputs
        .iter()
        .map(|input| -> ValidationResult<ScalarParameter> {
            let name = &input.name;
            let raw = request.get(name).ok_or_else(|| {
                PyboxError::input_validation(
                    "INPUT.INCOMPLETE_PARAMETERS",
                    format!("Input does not contain all required parameters: missing {name}."),
                )
            })?;
            let value = numeric_value(raw).ok_or_else(|| {
                PyboxError::input_validation(
                    "INPUT.PARAMETER_VALUE",
                    format!("Value '{name}' must be a number, got {raw}."),
                )
            })?;
            if !input.bounds.contains(value.value) {
                return Err(PyboxError::input_validation(
                    "INPUT.PARAMETER_RANGE",
                    format!("Value '{name}' must be {}.", input.bounds),
                ));
            }
            Ok(ScalarParameter {
                name: name.clone(),
                value,
            })
        })
        .collect()
}

fn numeric_value(raw: &Value) -> Option<NumericField> {
    match raw {
        Value::Number(number) => NumericField::from_number(number),
        _ => None,
    }
}
