//! Request validation and training snapshot

use super::settings::BatchSettings;
use crate::core::catalog::{CatalogError, TrainingCatalog};
use crate::core::models::{BatchFailure, GenerationRequest, TemplateFile, TrainingSnapshot};
use crate::core::renderer::FieldValues;
use chrono::NaiveDate;

/// Wire format of the completion date
pub const COMPLETION_DATE_FORMAT: &str = "%Y-%m-%d";

/// A request that passed validation, with the training frozen at submission
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub template: TemplateFile,
    pub training: TrainingSnapshot,
    pub completion_date: NaiveDate,
    /// Completion date as printed on certificates
    pub printed_date: String,
    pub location: String,
    pub city: String,
    pub roster_reference: String,
}

impl ValidatedRequest {
    /// Field values for one student. Workload always comes from the snapshot.
    pub fn fields_for(&self, student_name: &str) -> FieldValues {
        FieldValues {
            student_name: student_name.trim().to_string(),
            training_name: self.training.name.clone(),
            workload: self.training.workload.to_string(),
            completion_date: self.printed_date.clone(),
            location: self.location.clone(),
            city: self.city.clone(),
        }
    }
}

/// Check a request and resolve its training.
///
/// Every problem found is reported in the single `InvalidRequest` reason.
pub(super) async fn validate_request(
    request: GenerationRequest,
    catalog: &dyn TrainingCatalog,
    settings: &BatchSettings,
) -> Result<ValidatedRequest, BatchFailure> {
    let mut problems = Vec::new();

    check_template(&request.template, settings, &mut problems);

    let location = required(&request.location, "location", &mut problems);
    let city = required(&request.city, "city", &mut problems);
    let roster_reference = required(&request.roster_reference, "roster reference", &mut problems);

    let completion_date =
        match NaiveDate::parse_from_str(request.completion_date.trim(), COMPLETION_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                problems.push(format!(
                    "completion date '{}' is not a YYYY-MM-DD date",
                    request.completion_date
                ));
                None
            }
        };

    let training_id = request.training_id.trim();
    let training = if training_id.is_empty() {
        problems.push("training id is required".to_string());
        None
    } else {
        match catalog.lookup(training_id).await {
            Ok(snapshot) => Some(snapshot),
            Err(CatalogError::NotFound(id)) => {
                problems.push(format!("training '{}' does not exist", id));
                None
            }
            Err(e) => {
                problems.push(e.to_string());
                None
            }
        }
    };

    let printed_date = completion_date.and_then(|date| {
        let printed = print_date(date, &settings.date_format);
        if printed.is_none() {
            problems.push(format!("date format '{}' is invalid", settings.date_format));
        }
        printed
    });

    match (training, completion_date, printed_date) {
        (Some(training), Some(completion_date), Some(printed_date)) if problems.is_empty() => {
            Ok(ValidatedRequest {
                printed_date,
                template: request.template,
                training,
                completion_date,
                location,
                city,
                roster_reference,
            })
        }
        _ => Err(BatchFailure::invalid_request(problems.join("; "))),
    }
}

/// Format a date, `None` when the format string has invalid specifiers
pub(crate) fn print_date(date: NaiveDate, format: &str) -> Option<String> {
    use std::fmt::Write;

    let mut printed = String::new();
    write!(printed, "{}", date.format(format)).ok()?;
    Some(printed)
}

fn check_template(template: &TemplateFile, settings: &BatchSettings, problems: &mut Vec<String>) {
    if template.is_empty() {
        problems.push("template file is empty".to_string());
        return;
    }

    match template.extension() {
        Some(ext) if settings.template_extensions.contains(&ext) => {}
        _ => {
            problems.push(format!(
                "template '{}' is not a supported format (expected {})",
                template.filename,
                settings.template_extensions.join(", ")
            ));
            return;
        }
    }

    if !template.is_zip_package() {
        problems.push(format!(
            "template '{}' is not a valid presentation package",
            template.filename
        ));
    }
}

fn required(value: &str, field: &str, problems: &mut Vec<String>) -> String {
    let value = value.trim();
    if value.is_empty() {
        problems.push(format!("{} is required", field));
    }
    value.to_string()
}
