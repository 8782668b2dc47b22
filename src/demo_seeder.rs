use chrono::{DateTime, NaiveDate, Utc};

use crate::db::models::{Department, DocType, Document, FileFormat};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;

/// Midnight UTC on the given day. Only called with literal seed dates.
fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, date)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .expect("seed dates are valid calendar days")
}

#[allow(clippy::too_many_arguments)]
fn seed_document(
    title: &str,
    doc_type: DocType,
    departments: &[Department],
    last_updated: DateTime<Utc>,
    version: &str,
    size_kb: u32,
    format: FileFormat,
    canonical_id: &str,
) -> Document {
    let extension = match format {
        FileFormat::Pdf => "pdf",
        FileFormat::Docx => "docx",
        FileFormat::Xlsx => "xlsx",
    };
    let download_url = format!(
        "https://example.com/docs/{}-{}.{}",
        canonical_id,
        version.replace('.', "-"),
        extension
    );

    Document {
        id: None,
        title: title.to_string(),
        doc_type,
        departments: departments.to_vec(),
        last_updated,
        version: version.to_string(),
        latest: true,
        size_kb,
        format,
        canonical_id: canonical_id.to_string(),
        download_url,
    }
}

/// The example catalog inserted into an empty store.
pub fn demo_documents() -> Vec<Document> {
    use Department::*;

    vec![
        seed_document(
            "Employee Handbook",
            DocType::Policies,
            &[Operations],
            day(2025, 10, 2),
            "v3.2",
            120,
            FileFormat::Pdf,
            "employee-handbook",
        ),
        seed_document(
            "PTO Request Form",
            DocType::Forms,
            &[Operations],
            day(2025, 7, 14),
            "v2.1",
            48,
            FileFormat::Pdf,
            "pto-request-form",
        ),
        seed_document(
            "Performance Review Template",
            DocType::Templates,
            &[Design, Engineering],
            day(2025, 3, 9),
            "v1.8",
            96,
            FileFormat::Docx,
            "performance-review-template",
        ),
        seed_document(
            "Remote Work Policy",
            DocType::Policies,
            &[Engineering, Design, Marketing],
            day(2025, 6, 1),
            "v2.0",
            85,
            FileFormat::Pdf,
            "remote-work-policy",
        ),
        seed_document(
            "Offer Letter Template",
            DocType::Templates,
            &[Operations, Finance],
            day(2025, 9, 10),
            "v4.0",
            64,
            FileFormat::Docx,
            "offer-letter-template",
        ),
        seed_document(
            "Exit Interview Checklist",
            DocType::Checklists,
            &[Operations],
            day(2024, 12, 5),
            "v1.2",
            33,
            FileFormat::Pdf,
            "exit-interview-checklist",
        ),
        seed_document(
            "Benefits Enrollment Guide",
            DocType::Guides,
            &[Operations, Finance],
            day(2025, 5, 22),
            "v3.0",
            220,
            FileFormat::Pdf,
            "benefits-enrollment-guide",
        ),
        seed_document(
            "Expense Reimbursement Form",
            DocType::Forms,
            &[Finance],
            day(2025, 8, 2),
            "v2.4",
            41,
            FileFormat::Xlsx,
            "expense-reimbursement-form",
        ),
        seed_document(
            "Salary Increase Form",
            DocType::Forms,
            &[Finance, Operations],
            day(2025, 9, 29),
            "v1.5",
            57,
            FileFormat::Docx,
            "salary-increase-form",
        ),
        seed_document(
            "Job Description Templates",
            DocType::Templates,
            &[Operations, Design, Marketing, Sales],
            day(2025, 2, 11),
            "v1.0",
            75,
            FileFormat::Docx,
            "job-description-templates",
        ),
    ]
}

/// Insert the demo catalog if the store holds no documents.
///
/// Returns the number of documents inserted (zero when the store was
/// already populated).
pub async fn try_seed_if_empty(repo: &dyn DocumentRepository) -> Result<usize, AppError> {
    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!("Catalog already holds {} documents, skipping seed.", existing);
        return Ok(0);
    }

    let documents = demo_documents();
    let inserted = documents.len();
    repo.insert_many(documents).await?;
    Ok(inserted)
}

/// Startup seeding. Failures are logged and swallowed so the service can
/// still serve.
pub async fn seed_demo_data(repo: &dyn DocumentRepository) {
    tracing::info!("Starting demo data seeding...");

    match try_seed_if_empty(repo).await {
        Ok(0) => {}
        Ok(count) => tracing::info!("Seeded {} demo documents.", count),
        Err(e) => tracing::error!("Demo data seeding failed: {}", e),
    }

    tracing::info!("Demo data seeding completed.");
}
