use crate::cli::OutputFormat;

pub struct DefaultsConfig {
    pub strip_final_newline: bool,
    pub output_format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            strip_final_newline: false,
            output_format: OutputFormat::Table,
        }
    }
}
