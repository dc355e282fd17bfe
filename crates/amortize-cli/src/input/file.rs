use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use amortize_core::loan::LoanRequest;
use log::debug;

/// Load a loan request from a JSON file given with `--input`.
pub fn read_request(path: &str) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let path = Path::new(path);
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => format!("input file {} does not exist", path.display()),
        _ => format!("cannot access input file {}: {e}", path.display()),
    })?;
    if metadata.is_dir() {
        let message = format!("input {} is a directory, expected a JSON file", path.display());
        return Err(message.into());
    }

    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read input file {}: {e}", path.display()))?;
    debug!("read {} bytes of loan request from {}", text.len(), path.display());

    serde_json::from_str(&text)
        .map_err(|e| format!("input file {} is not a loan request: {e}", path.display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("amortize-cli-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_reads_request_with_short_field_names() {
        let path = scratch_path("loan.json");
        fs::write(&path, r#"{"loan_amount": "500000", "rate": 5, "years": 30}"#).unwrap();
        let request = read_request(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(request, LoanRequest::new("500000", 5, 30));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = scratch_path("absent.json");
        let err = read_request(path.to_str().unwrap()).unwrap_err().to_string();
        assert!(err.contains("does not exist"), "{err}");
        assert!(err.contains("absent.json"), "{err}");
    }

    #[test]
    fn test_directory_rejected() {
        let dir = std::env::temp_dir();
        let err = read_request(dir.to_str().unwrap()).unwrap_err().to_string();
        assert!(err.contains("is a directory"), "{err}");
    }

    #[test]
    fn test_malformed_json_rejected() {
        let path = scratch_path("broken.json");
        fs::write(&path, "{ loan_amount: ").unwrap();
        let err = read_request(path.to_str().unwrap()).unwrap_err().to_string();
        fs::remove_file(&path).unwrap();
        assert!(err.contains("is not a loan request"), "{err}");
    }
}
