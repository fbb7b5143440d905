use snafu::prelude::*;

use crate::tabular::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::fs;

/// The parameters of a run, as read from a JSON file.
///
/// All the fields are optional: the missing ones must be provided on the
/// command line.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    /// A string ("1,1,2") or an array of numbers.
    pub weights: Option<JSValue>,
    /// A string ("+,-,+") or an array of strings.
    pub impacts: Option<JSValue>,
    #[serde(rename = "resultFile")]
    pub result_file: Option<String>,
    #[serde(rename = "referenceFile")]
    pub reference_file: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    pub delimiter: Option<String>,
}

impl RunConfig {
    pub fn weights_text(&self) -> CliResult<Option<String>> {
        read_js_list(&self.weights, "weights")
    }

    pub fn impacts_text(&self) -> CliResult<Option<String>> {
        read_js_list(&self.impacts, "impacts")
    }

    pub fn delimiter_char(&self) -> CliResult<Option<char>> {
        match &self.delimiter {
            None => Ok(None),
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Some(c)),
                    _ => ConfigValueSnafu { key: "delimiter" }.fail(),
                }
            }
        }
    }

    // Relative paths are relative to the directory of the configuration file.
    fn resolve_paths(self, root: &Path) -> RunConfig {
        let resolve = |p: Option<String>| p.map(|s| root.join(s).display().to_string());
        RunConfig {
            input_file: resolve(self.input_file),
            result_file: resolve(self.result_file),
            reference_file: resolve(self.reference_file),
            ..self
        }
    }
}

pub fn read_config(path: &str) -> CliResult<RunConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: RunConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    debug!("read_config: {:?}", config);
    let root = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(root))
}

// Both "1,2,3" and [1, 2, 3] are accepted. The array is turned into the
// string form so that the validation is the same as on the command line.
fn read_js_list(x: &Option<JSValue>, key: &str) -> CliResult<Option<String>> {
    match x {
        None => Ok(None),
        Some(JSValue::String(s)) => Ok(Some(s.clone())),
        Some(JSValue::Array(elts)) => {
            let mut tokens: Vec<String> = Vec::with_capacity(elts.len());
            for elt in elts {
                match elt {
                    JSValue::Number(n) => tokens.push(n.to_string()),
                    JSValue::String(s) => tokens.push(s.clone()),
                    _ => return ConfigValueSnafu { key }.fail(),
                }
            }
            Ok(Some(tokens.join(",")))
        }
        Some(_) => ConfigValueSnafu { key }.fail(),
    }
}
