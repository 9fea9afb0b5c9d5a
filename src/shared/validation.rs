use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating German postal codes
    /// Exactly five digits, leading zeros allowed
    /// - Valid: "20095", "04103"
    /// - Invalid: "2009", "200955", "2009a", " 20095"
    pub static ref POSTAL_CODE_REGEX: Regex = Regex::new(r"^[0-9]{5}$").unwrap();
}
