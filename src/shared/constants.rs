/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Open drafts kept in memory before the oldest one is evicted
pub const DEFAULT_MAX_DRAFTS: usize = 10_000;

// =============================================================================
// MAIL CONSTANTS
// =============================================================================

/// Subject prefix of report mails, followed by the license plate
pub const MAIL_SUBJECT_PREFIX: &str = "Anzeige";

/// Format of the violation time printed into report mails, in local wall-clock time
pub const MAIL_DATE_FORMAT: &str = "%d.%m.%Y, %H:%M Uhr";
