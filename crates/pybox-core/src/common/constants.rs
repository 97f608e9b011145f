pub const BASE_OUTPUT_FILENAME: &str = "out_file";
pub const OUTPUT_FILENAME_FLAG: &str = "-o";
pub const FLAG_PREFIX: &str = "--";

pub const PARTICLE_CLASSES_FIELD: &str = "multiple_values";
pub const MIN_PARTICLE_CLASSES: usize = 1;
pub const MAX_PARTICLE_CLASSES: usize = 21;

pub const EPS0_KEY: &str = "eps0";
pub const RHOS_KEY: &str = "rhos";
pub const DS_KEY: &str = "ds";

/// Volume fractions across all classes must stay strictly below this.
pub const EPS0_SUM_LIMIT: f64 = 1.0;

pub const ENVELOPE_MEDIA_TYPE: &str = "application/json";
pub const TEXT_MEDIA_TYPE: &str = "text/plain";
pub const GEOTIFF_MEDIA_TYPE: &str = "application/tiff; application=geotiff";
pub const SERIES_MEDIA_TYPE: &str = "application/json";
pub const BASE64_ENCODING: &str = "base64";

pub const PROCESS_ID: &str = "pybox";
pub const PROCESS_VERSION: &str = "1.0.0";
