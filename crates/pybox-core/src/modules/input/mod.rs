mod model;
mod validation;

use crate::common::ProcessDescriptor;
use crate::common::constants::{FLAG_PREFIX, OUTPUT_FILENAME_FLAG};
use crate::domain::{ArgValue, ArgumentMap, PyboxResult, RequestedOutputs};
use crate::modules::serialization::join_numbers;
use serde_json::Value;
use tracing::{debug, info};

use validation::{
    check_eps0_sum, check_field_set, check_particle_class_count, check_particle_classes,
    check_requested_outputs, check_scalar_ranges, particle_class_list, request_object,
};

/// Validates execution requests and turns them into simulator arguments.
#[derive(Debug, Clone, Copy)]
pub struct InputTranslator<'a> {
    descriptor: &'a ProcessDescriptor,
}

impl<'a> InputTranslator<'a> {
    pub fn new(descriptor: &'a ProcessDescriptor) -> Self {
        Self { descriptor }
    }

    /// Runs the validation stages in order and, when all pass, builds the
    /// argument map: `--eps0`/`--rhos`/`--ds` as space-joined lists, one
    /// `--<name>` flag per scalar input, and `-o` with the base filename.
    pub fn translate(
        &self,
        request: &Value,
        requested: &RequestedOutputs,
    ) -> PyboxResult<ArgumentMap> {
        let descriptor = self.descriptor;

        check_requested_outputs(descriptor, requested)?;
        let request = request_object(request)?;
        check_field_set(descriptor, request)?;
        debug!(fields = request.len(), "request field set accepted");

        let classes = particle_class_list(descriptor, request)?;
        check_particle_class_count(descriptor, classes)?;
        let classes = check_particle_classes(descriptor, classes)?;
        check_eps0_sum(descriptor, &classes)?;
        debug!(classes = classes.len(), "particle classes accepted");

        let scalars = check_scalar_ranges(descriptor, request)?;

        let mut arguments = ArgumentMap::new();
        arguments.insert(
            "--eps0",
            ArgValue::Text(join_numbers(classes.iter().map(|class| &class.eps0.raw))),
        );
        arguments.insert(
            "--rhos",
            ArgValue::Text(join_numbers(classes.iter().map(|class| &class.rhos.raw))),
        );
        arguments.insert(
            "--ds",
            ArgValue::Text(join_numbers(classes.iter().map(|class| &class.ds.raw))),
        );
        for scalar in scalars {
            arguments.insert(
                format!("{FLAG_PREFIX}{}", scalar.name),
                ArgValue::Number(scalar.value.raw),
            );
        }
        arguments.insert(
            OUTPUT_FILENAME_FLAG,
            ArgValue::Text(descriptor.base_output_filename.clone()),
        );

        info!(
            arguments = arguments.len(),
            classes = classes.len(),
            "translated request into simulator arguments"
        );
        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::InputTranslator;
    use crate::common::ProcessDescriptor;
    use crate::domain::{ArgValue, PyboxErrorCategory, RequestedOutputs};
    use serde_json::{Number, Value, json};

    fn valid_request() -> Value {
        json!({
            "lat": 40.8,
            "lon": 14.1,
            "l0": 500,
            "h0": 300,
            "theta0": 900,
            "dt": 1.0,
            "margin": 10000,
            "multiple_values": [{ "eps0": 0.05, "rhos": 2500, "ds": 0.0001 }],
        })
    }

    fn text(value: &str) -> ArgValue {
        ArgValue::Text(value.to_string())
    }

    #[test]
    fn valid_request_maps_every_field_to_one_flag() {
        let descriptor = ProcessDescriptor::pybox();
        let arguments = InputTranslator::new(&descriptor)
            .translate(&valid_request(), &RequestedOutputs::all())
            .expect("valid request should translate");

        assert_eq!(
            arguments.flags().collect::<Vec<_>>(),
            [
                "--eps0", "--rhos", "--ds", "--lat", "--lon", "--l0", "--h0", "--theta0", "--dt",
                "--margin", "-o"
            ]
        );
        assert_eq!(arguments.get("--eps0"), Some(&text("0.05")));
        assert_eq!(arguments.get("--rhos"), Some(&text("2500")));
        assert_eq!(arguments.get("--ds"), Some(&text("0.0001")));
        assert_eq!(
            arguments.get("--lat"),
            Some(&ArgValue::Number(Number::from_f64(40.8).expect("finite")))
        );
        assert_eq!(
            arguments.get("--margin"),
            Some(&ArgValue::Number(Number::from(10000)))
        );
        assert_eq!(arguments.get("-o"), Some(&text("out_file")));
    }

    #[test]
    fn class_lists_keep_class_order() {
        let descriptor = ProcessDescriptor::pybox();
        let mut request = valid_request();
        request["multiple_values"] = json!([
            { "eps0": 0.1, "rhos": 1000, "ds": 0.001 },
            { "eps0": 0.02, "rhos": 2000, "ds": 0.002 },
            { "eps0": 0.03, "rhos": 3000, "ds": 0.003 },
        ]);

        let arguments = InputTranslator::new(&descriptor)
            .translate(&request, &RequestedOutputs::all())
            .expect("three classes should translate");
        assert_eq!(arguments.get("--eps0"), Some(&text("0.1 0.02 0.03")));
        assert_eq!(arguments.get("--rhos"), Some(&text("1000 2000 3000")));
        assert_eq!(arguments.get("--ds"), Some(&text("0.001 0.002 0.003")));
    }

    #[test]
    fn base_filename_follows_the_descriptor() {
        let mut descriptor = ProcessDescriptor::pybox();
        descriptor.base_output_filename = "run_42".to_string();
        let arguments = InputTranslator::new(&descriptor)
            .translate(&valid_request(), &RequestedOutputs::all())
            .expect("valid request should translate");
        assert_eq!(arguments.get("-o"), Some(&text("run_42")));
    }

    #[test]
    fn output_check_runs_before_any_input_check() {
        let descriptor = ProcessDescriptor::pybox();
        let error = InputTranslator::new(&descriptor)
            .translate(&json!({}), &RequestedOutputs::from_names(["grafico_1"]))
            .expect_err("unknown output should fail first");
        assert_eq!(error.placeholder(), "INPUT.UNEXPECTED_OUTPUT");
        assert_eq!(error.category(), PyboxErrorCategory::InputValidationError);
    }

    #[test]
    fn completeness_errors_win_over_range_errors() {
        let descriptor = ProcessDescriptor::pybox();
        let mut request = valid_request();
        request["lat"] = json!(95.0);
        request["extra"] = json!(1);

        let error = InputTranslator::new(&descriptor)
            .translate(&request, &RequestedOutputs::all())
            .expect_err("extra field should fail");
        assert_eq!(error.placeholder(), "INPUT.UNEXPECTED_PARAMETERS");
    }

    #[test]
    fn class_errors_win_over_scalar_errors() {
        let descriptor = ProcessDescriptor::pybox();
        let mut request = valid_request();
        request["lat"] = json!(95.0);
        request["multiple_values"] = json!([{ "eps0": 0.05, "rhos": 2500 }]);

        let error = InputTranslator::new(&descriptor)
            .translate(&request, &RequestedOutputs::all())
            .expect_err("missing ds should fail");
        assert_eq!(error.placeholder(), "INPUT.PARTICLE_CLASS_KEY");
    }
}
