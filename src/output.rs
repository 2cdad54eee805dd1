use serde::Serialize;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("LEXINDEX_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_format(format: &str) -> anyhow::Result<Self> {
        match format.to_lowercase().as_str() {
            "text" | "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => anyhow::bail!("unknown output format: {} (expected text or json)", other),
        }
    }

    pub fn is_human(&self) -> bool {
        *self == OutputMode::Human
    }
}

/// Envelope for machine-readable command output
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub ok: bool,
    pub command: &'static str,
    pub data: T,
}

pub fn emit_success<T: Serialize>(command: &'static str, data: T) -> anyhow::Result<()> {
    let envelope = Envelope { ok: true, command, data };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_from_format() {
        assert_eq!(OutputMode::from_format("JSON").unwrap(), OutputMode::Json);
        assert!(OutputMode::from_format("text").unwrap().is_human());
        assert!(OutputMode::from_format("yaml").is_err());
    }
}
