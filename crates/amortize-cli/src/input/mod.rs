pub mod file;
pub mod stdin;

use amortize_core::loan::LoanRequest;

type FlagFields = (Option<String>, Option<String>, Option<String>);

/// Resolve the loan request: `--input` file first, then the individual
/// flags when any is given, then JSON piped on stdin.
pub fn load_request(
    path: Option<&str>,
    (loan_amount, rate, years): FlagFields,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_request(path);
    }
    if loan_amount.is_some() || rate.is_some() || years.is_some() {
        return Ok(LoanRequest::new(
            loan_amount.ok_or("--loan-amount is required (or provide --input)")?,
            rate.ok_or("--rate is required (or provide --input)")?,
            years.ok_or("--years is required (or provide --input)")?,
        ));
    }
    if let Some(data) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("--loan-amount, --rate and --years, --input <file.json>, or stdin required".into())
}
