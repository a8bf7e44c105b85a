use crate::{ApplicationOptions, DEFAULT_INPUT, DEFAULT_OUTPUT};
use clap::Parser;
use log::info;

impl Clone for ApplicationOptions {
    fn clone(&self) -> Self {
        ApplicationOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            codes: self.codes.clone(),
            from_json: self.from_json,
            ignore_case: self.ignore_case,
            show_mapping: self.show_mapping,
        }
    }
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            output: DEFAULT_OUTPUT.into(),
            codes: None,
            from_json: false,
            ignore_case: false,
            show_mapping: false,
        }
    }
}

pub fn arg_parse() -> ApplicationOptions {
    env_logger::init();

    let cli = ApplicationOptions::parse();

    info!("Parsed following arguments: ");
    info!("{:?}", &cli);
    cli
}
