use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use write_fonts::types::Fixed;

/// Build version, stamped into `head.fontRevision` and name ids 3 and 5.
#[derive(Debug, Clone, PartialEq)]
pub struct FontVersion {
    /// Version tag as written into the name table (e.g. "2024-01-15.1" or "1.002").
    pub tag: String,
    kind: VersionKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum VersionKind {
    Date(NaiveDate),
    Numeric(f64),
}

impl FontVersion {
    /// Create a date-based version.
    pub fn new(date: NaiveDate, tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), kind: VersionKind::Date(date) }
    }

    /// Parse a version string, or use today's date when none is given.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD.N` and numeric `M.mmm[.p]`.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        let Some(v) = value else {
            let today = chrono::Local::now().date_naive();
            return Ok(Self::new(today, today.format("%Y-%m-%d").to_string()));
        };

        // Try YYYY-MM-DD.N format first
        if let Some((date_part, build_num)) = v.rsplit_once('.')
            && build_num.parse::<u32>().is_ok()
            && let Ok(parsed) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        {
            return Ok(Self::new(parsed, v));
        }

        if let Ok(parsed) = NaiveDate::parse_from_str(v, "%Y-%m-%d") {
            return Ok(Self::new(parsed, v));
        }

        if let Some(revision) = parse_numeric(v) {
            return Ok(Self { tag: v.to_string(), kind: VersionKind::Numeric(revision) });
        }

        Err(anyhow!("Invalid version '{v}'. Expected YYYY-MM-DD, YYYY-MM-DD.N or M.mmm."))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self.kind {
            VersionKind::Date(date) => Some(date),
            VersionKind::Numeric(_) => None,
        }
    }

    /// Get the version string (e.g., "Version 2024-01-15").
    pub fn version_string(&self) -> String {
        format!("Version {}", self.tag)
    }

    /// Font revision: YYYY.MMDD for dates, the numeric value otherwise.
    pub fn revision(&self) -> Fixed {
        match self.kind {
            VersionKind::Date(date) => {
                let month_day = (date.month() * 100 + date.day()) as f64 / 10000.0;
                Fixed::from_f64(date.year() as f64 + month_day)
            }
            VersionKind::Numeric(value) => Fixed::from_f64(value),
        }
    }
}

/// `M.mmm` or `M.mmm.p`; the patch component does not affect the revision.
fn parse_numeric(value: &str) -> Option<f64> {
    let mut parts = value.split('.');
    let major: u16 = parts.next()?.parse().ok()?;
    let minor = parts.next()?;
    if minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(patch) = parts.next() {
        patch.parse::<u32>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    let minor_value: f64 = minor.parse().ok()?;
    Some(major as f64 + minor_value / 10f64.powi(minor.len() as i32))
}
