pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Plan from `--input`, else from piped stdin.
pub fn read_plan<T: DeserializeOwned>(
    path: Option<&str>,
    command: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_input(path)
    } else if let Some(data) = stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <plan.json|plan.yaml> or stdin required for {command}").into())
    }
}
