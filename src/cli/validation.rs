use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::runner::MAX_COUNT;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(count) = args.count {
        if count == 0 || count > MAX_COUNT {
            return Err(format!("invalid count {count}, expected 1..={MAX_COUNT}"));
        }
    }
    if let Some(workers) = args.workers {
        if workers == 0 {
            return Err("invalid workers, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.api_url.as_deref() {
        let parsed =
            reqwest::Url::parse(raw.trim()).map_err(|e| format!("invalid --api-url '{raw}': {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("invalid --api-url '{raw}': expected http or https"));
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text or json"
            ));
        }
    }
    if let Some(id) = args.select {
        if id == 0 {
            return Err("invalid --select, ids start at 1".to_string());
        }
    }
    Ok(())
}
