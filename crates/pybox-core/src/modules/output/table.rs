use crate::domain::{CollectResult, PyboxError, SeriesColumn, SeriesTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

impl ColumnSpec {
    const fn new(label: &'static str, unit: &'static str, description: &'static str) -> Self {
        Self {
            label,
            unit,
            description,
        }
    }

    fn column(self, values: Vec<f64>) -> SeriesColumn {
        SeriesColumn::new(
            self.label,
            self.unit,
            Some(self.description.to_string()),
            values,
        )
    }
}

const TEMPORAL_DOMAIN: ColumnSpec = ColumnSpec::new(
    "length(m)",
    "m",
    "distance of the current front from the vent",
);

const TEMPORAL_SERIES: [ColumnSpec; 7] = [
    ColumnSpec::new(
        "height(m)",
        "m",
        "average thickness (height) of the current",
    ),
    ColumnSpec::new("rho_c(kg/m3)", "kg/m^3", "bulk density of the current"),
    ColumnSpec::new("u(m/s)", "m/s", "front propagation velocity"),
    ColumnSpec::new("TPE(J)", "J", "total potential energy"),
    ColumnSpec::new("TKE(J)", "J", "total kinetic energy"),
    ColumnSpec::new(
        "hmax(m)",
        "m",
        "maximum run-up height (potential to overcome topographic obstacles)",
    ),
    ColumnSpec::new("time(s)", "s", "time from the start of the propagation"),
];

const DEPOSIT_DOMAIN: ColumnSpec = ColumnSpec::new(
    "current front position(m)",
    "m",
    "front distance from vent at the moment of deposition",
);

const DEPOSIT_SERIES: [ColumnSpec; 1] = [ColumnSpec::new(
    "total deposit thickness(m)",
    "m",
    "cumulative thickness of all deposited particle classes",
)];

const EXTRA_UNIT: &str = "-";

/// The two numeric tables the simulator writes. Both share one layout: a
/// domain column, a fixed run of named series, then one column per
/// particle class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    TemporalEvolution,
    DepositThickness,
}

impl TableKind {
    pub const fn domain(self) -> ColumnSpec {
        match self {
            Self::TemporalEvolution => TEMPORAL_DOMAIN,
            Self::DepositThickness => DEPOSIT_DOMAIN,
        }
    }

    pub const fn fixed_series(self) -> &'static [ColumnSpec] {
        match self {
            Self::TemporalEvolution => &TEMPORAL_SERIES,
            Self::DepositThickness => &DEPOSIT_SERIES,
        }
    }

    /// Columns every row must carry: the domain plus the fixed series.
    pub const fn fixed_column_count(self) -> usize {
        1 + self.fixed_series().len()
    }

    fn extra_description(self, class_index: usize) -> String {
        match self {
            Self::TemporalEvolution => format!("volume fraction of particle class {class_index}"),
            Self::DepositThickness => {
                format!("granulometric class {class_index} deposit thickness(m)")
            }
        }
    }

    fn extra_column(self, class_index: usize, values: Vec<f64>) -> SeriesColumn {
        SeriesColumn::new(
            format!("eps_{class_index}"),
            EXTRA_UNIT,
            Some(self.extra_description(class_index)),
            values,
        )
    }
}

/// Lines that are empty or do not start with a digit or `-` are headers.
fn is_data_line(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|first| first.is_ascii_digit() || first == '-')
}

fn parse_row(source_name: &str, line_number: usize, line: &str) -> CollectResult<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                table_error(
                    source_name,
                    line_number,
                    format!("token '{token}' is not a number"),
                )
            })
        })
        .collect()
}

/// Parses a whitespace-delimited table into a series table.
///
/// The first data row fixes the number of per-class columns; any later row
/// with a different width is rejected. `source_name` only feeds error
/// messages.
pub fn parse_series_table(
    kind: TableKind,
    source_name: &str,
    source: &str,
) -> CollectResult<SeriesTable> {
    let fixed = kind.fixed_column_count();
    let mut columns: Vec<Vec<f64>> = Vec::new();
    let mut width = None;

    for (index, line) in source.lines().enumerate() {
        if !is_data_line(line) {
            continue;
        }

        let line_number = index + 1;
        let values = parse_row(source_name, line_number, line)?;
        if values.len() < fixed {
            return Err(table_error(
                source_name,
                line_number,
                format!(
                    "expected at least {fixed} columns, found {}",
                    values.len()
                ),
            ));
        }

        match width {
            None => {
                width = Some(values.len());
                columns = vec![Vec::new(); values.len()];
            }
            Some(expected) if expected != values.len() => {
                return Err(table_error(
                    source_name,
                    line_number,
                    format!(
                        "expected {expected} columns as in the first data row, found {}",
                        values.len()
                    ),
                ));
            }
            Some(_) => {}
        }

        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }

    if columns.is_empty() {
        columns = vec![Vec::new(); fixed];
    }

    let mut columns = columns.into_iter();
    let domain = kind
        .domain()
        .column(columns.next().unwrap_or_default());
    let mut series = kind
        .fixed_series()
        .iter()
        .map(|spec| spec.column(columns.next().unwrap_or_default()))
        .collect::<Vec<_>>();
    series.extend(
        columns
            .enumerate()
            .map(|(class_index, values)| kind.extra_column(class_index, values)),
    );

    Ok(SeriesTable { domain, series })
}

fn table_error(source_name: &str, line_number: usize, detail: String) -> PyboxError {
    PyboxError::parse(
        "PARSE.TABLE_ROW",
        format!("{source_name} line {line_number}: {detail}"),
    )
}
