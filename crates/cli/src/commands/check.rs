//! Read-only content audit.
//!
//! # Usage
//!
//! ```bash
//! la-fleur check
//! ```
//!
//! Queries the store with the raw perspective so drafts are visible next to
//! published documents. Needs `SANITY_PROJECT_ID` and `SANITY_READ_TOKEN`.

use std::collections::HashSet;

use la_fleur_storefront::config::StorefrontConfig;
use la_fleur_storefront::sanity::documents::{AuditEntry, decode_audit};
use la_fleur_storefront::sanity::{
    ContentSource, Perspective, Query, ReadMode, SanityClient, SanityError, queries,
};
use thiserror::Error;

/// Errors that can occur during the audit.
#[derive(Debug, Error)]
pub enum CheckError {
    /// No content store is configured.
    #[error("SANITY_PROJECT_ID is not set")]
    NotConfigured,

    /// Drafts are only visible with a token.
    #[error("SANITY_READ_TOKEN is required to read drafts")]
    MissingToken,

    /// The store query failed.
    #[error(transparent)]
    Sanity(#[from] SanityError),
}

/// Audit summary.
#[derive(Debug, Default)]
pub struct AuditReport {
    pub published: Vec<AuditEntry>,
    pub drafts: Vec<AuditEntry>,
    /// Draft ids with no published counterpart.
    pub unpublished: Vec<String>,
    /// Published ids without a usable slug (not reachable on the site).
    pub missing_slug: Vec<String>,
}

impl AuditReport {
    /// Split audit rows into published and draft documents.
    #[must_use]
    pub fn from_entries(entries: Vec<AuditEntry>) -> Self {
        let (drafts, published): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(AuditEntry::is_draft);

        let published_ids: HashSet<&str> = published.iter().map(|e| e.id.as_str()).collect();
        let unpublished = drafts
            .iter()
            .filter(|draft| {
                let id = draft.id.strip_prefix("drafts.").unwrap_or(&draft.id);
                !published_ids.contains(id)
            })
            .map(|draft| draft.id.clone())
            .collect();
        let missing_slug = published
            .iter()
            .filter(|entry| entry.slug.as_deref().is_none_or(|s| s.trim().is_empty()))
            .map(|entry| entry.id.clone())
            .collect();

        Self {
            published,
            drafts,
            unpublished,
            missing_slug,
        }
    }
}

/// Fetch every product, drafts included, and summarize.
///
/// # Errors
///
/// Returns an error if the store is not configured, no token is set, or the
/// query fails.
pub async fn run(config: &StorefrontConfig) -> Result<AuditReport, CheckError> {
    let sanity = config.sanity.as_ref().ok_or(CheckError::NotConfigured)?;
    let client = SanityClient::new(sanity)?;
    if !client.has_token() {
        return Err(CheckError::MissingToken);
    }

    tracing::info!(
        project = client.project_id(),
        dataset = client.dataset(),
        "Auditing products"
    );

    let query = Query::new("product_audit", queries::PRODUCT_AUDIT).perspective(Perspective::Raw);
    let rows = client.query(&query, ReadMode::Fresh).await?;
    Ok(AuditReport::from_entries(decode_audit(rows)?))
}

fn describe(entry: &AuditEntry) -> String {
    let flag = |value: Option<bool>, yes: &str, no: &str| match value {
        Some(true) => yes.to_string(),
        Some(false) => no.to_string(),
        None => "?".to_string(),
    };
    format!(
        "{:<40} {:<32} {:<18} {:<9} {}",
        entry.id,
        entry.slug.as_deref().unwrap_or("-"),
        entry.category.as_deref().unwrap_or("-"),
        flag(entry.in_stock, "in stock", "sold out"),
        flag(entry.featured, "featured", ""),
    )
}

/// Print the report.
#[allow(clippy::print_stdout)]
pub fn print(report: &AuditReport) {
    println!("Published ({}):", report.published.len());
    for entry in &report.published {
        println!("  {}", describe(entry));
    }

    println!("\nDrafts ({}):", report.drafts.len());
    for entry in &report.drafts {
        println!("  {}", describe(entry));
    }

    if !report.unpublished.is_empty() {
        println!("\nNever published:");
        for id in &report.unpublished {
            println!("  {id}");
        }
    }

    if !report.missing_slug.is_empty() {
        println!("\nPublished without a slug (not reachable on the site):");
        for id in &report.missing_slug {
            println!("  {id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, slug: Option<&str>) -> AuditEntry {
        AuditEntry {
            id: id.to_string(),
            title: Some("Garden Bliss".to_string()),
            slug: slug.map(str::to_string),
            category: Some("bouquets".to_string()),
            in_stock: Some(true),
            featured: None,
        }
    }

    #[test]
    fn test_report_splits_drafts() {
        let report = AuditReport::from_entries(vec![
            entry("abc", Some("garden-bliss")),
            entry("drafts.abc", Some("garden-bliss")),
            entry("drafts.new", Some("new-arrival")),
            entry("noslug", None),
        ]);

        assert_eq!(report.published.len(), 2);
        assert_eq!(report.drafts.len(), 2);
        assert_eq!(report.unpublished, vec!["drafts.new".to_string()]);
        assert_eq!(report.missing_slug, vec!["noslug".to_string()]);
    }

    #[test]
    fn test_describe_marks_unknown_flags() {
        let line = describe(&entry("abc", None));
        assert!(line.starts_with("abc"));
        assert!(line.contains("in stock"));
        assert!(line.ends_with('?'));
    }
}
