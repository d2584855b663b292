//! Coupon Entity

/// A manufacturer coupon row as the domain sees it
///
/// `ai_extraction` holds the machine-extracted offer text and may be
/// absent for rows that were never processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub id: i64,
    pub drug_name: String,
    pub ai_extraction: Option<String>,
}
