use envconfig::Envconfig;
use std::ops::Deref;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexBool(pub bool);

impl FromStr for FlexBool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(FlexBool(true)),
            "false" | "0" | "no" | "off" | "" => Ok(FlexBool(false)),
            _ => Err(format!("Invalid boolean value: {}", s)),
        }
    }
}

impl From<FlexBool> for bool {
    fn from(flex: FlexBool) -> Self {
        flex.0
    }
}

impl Deref for FlexBool {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    /// Directory holding one JSON document per feature, named by feature id.
    #[envconfig(from = "FEATURES_PATH", default = "features")]
    pub features_path: PathBuf,

    /// Emit every decision step as a `tracing` event.
    #[envconfig(from = "TRACE_DECISIONS", default = "false")]
    pub trace_decisions: FlexBool,
}

impl Config {
    pub fn default_test_config() -> Self {
        Self {
            features_path: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("standard-tests"),
            trace_decisions: FlexBool(false),
        }
    }
}
