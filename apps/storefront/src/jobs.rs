//! Batch fit jobs: the binary's unit of work.
//!
//! A job is one text and one container width. Jobs are independent: a rejected job
//! reports an error envelope and the rest of the batch still runs. The whole batch is
//! CPU-bound and runs on tokio's blocking pool.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jumbo::element::{JumboSettings, SkipReason};
use crate::layout::fitter::{fit_with_tuning, FitRequest};
use crate::layout::font_metrics::FontFamily;
use crate::layout::surface::TextSurface;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitJob {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    pub container_width: f64,
    #[serde(default)]
    pub font: Option<FontFamily>,
    #[serde(default)]
    pub min_font_size: Option<f64>,
    #[serde(default)]
    pub max_font_size: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitJobResult {
    pub id: Uuid,
    pub font_size: Option<f64>,
    pub probes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Values for fields a job leaves out.
#[derive(Debug, Clone, Copy)]
pub struct JobDefaults {
    pub font: FontFamily,
    pub settings: JumboSettings,
}

pub fn parse_jobs(json: &str) -> Result<Vec<FitJob>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads a JSON array of jobs from `path`, or from stdin when `path` is `None`.
pub fn load_jobs(path: Option<&Path>) -> Result<Vec<FitJob>, AppError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_jobs(&raw)
}

pub fn run_job(job: &FitJob, defaults: &JobDefaults) -> FitJobResult {
    let mut result = FitJobResult {
        id: job.id,
        font_size: None,
        probes: 0,
        skipped: None,
        error: None,
    };

    if job.text.trim().is_empty() {
        result.skipped = Some(SkipReason::EmptyText);
        return result;
    }

    let mut surface = TextSurface::new(job.text.as_str(), job.font.unwrap_or(defaults.font));
    let request = FitRequest {
        text_length: surface.char_count(),
        container_width: job.container_width,
        min_font_size: job
            .min_font_size
            .unwrap_or(defaults.settings.default_min_font_size),
        max_font_size: job
            .max_font_size
            .unwrap_or(defaults.settings.default_max_font_size),
    };

    match fit_with_tuning(
        &request,
        &defaults.settings.tuning,
        surface.overflow_probe(job.container_width),
    ) {
        Ok(report) => {
            result.font_size = Some(report.font_size);
            result.probes = report.probes;
        }
        Err(e) => {
            warn!(job = %job.id, error = %e, "Fit job rejected");
            result.error = Some(AppError::from(e).envelope());
        }
    }
    result
}

pub async fn run_jobs(
    jobs: Vec<FitJob>,
    defaults: JobDefaults,
) -> Result<Vec<FitJobResult>, AppError> {
    let results = tokio::task::spawn_blocking(move || {
        jobs.iter()
            .map(|job| run_job(job, &defaults))
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in fit jobs: {e}")))?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let skipped = results.iter().filter(|r| r.skipped.is_some()).count();
    info!(total = results.len(), failed, skipped, "Fit jobs finished");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn defaults() -> JobDefaults {
        JobDefaults {
            font: FontFamily::Oswald,
            settings: JumboSettings::default(),
        }
    }

    #[test]
    fn test_parse_generates_missing_ids() {
        let jobs = parse_jobs(
            r#"[
                {"text": "Go", "container_width": 320},
                {"text": "Go", "container_width": 320, "font": "inter", "max_font_size": 90}
            ]"#,
        )
        .unwrap();
        assert_eq!(jobs.len(), 2);
        assert_ne!(jobs[0].id, jobs[1].id);
        assert_eq!(jobs[1].font, Some(FontFamily::Inter));
        assert_eq!(jobs[1].max_font_size, Some(90.0));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_jobs(r#"[{"text": "Go"}]"#).unwrap_err();
        assert_eq!(err.code(), "JSON_ERROR");
    }

    #[test]
    fn test_run_job_fits_within_width() {
        let job = FitJob {
            id: Uuid::new_v4(),
            text: "Summer Sale".into(),
            container_width: 480.0,
            font: None,
            min_font_size: None,
            max_font_size: None,
        };
        let result = run_job(&job, &defaults());
        let size = result.font_size.unwrap();
        let mut surface = TextSurface::new("Summer Sale", FontFamily::Oswald);
        surface.set_font_size(size);
        assert!(surface.scroll_width() <= 480.0);
        assert!(result.probes >= 1);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_run_job_skips_blank_text() {
        let job = FitJob {
            id: Uuid::new_v4(),
            text: "   ".into(),
            container_width: 480.0,
            font: None,
            min_font_size: None,
            max_font_size: None,
        };
        let result = run_job(&job, &defaults());
        assert_eq!(result.skipped, Some(SkipReason::EmptyText));
        assert_eq!(result.font_size, None);
        assert_eq!(result.probes, 0);
    }

    #[test]
    fn test_run_job_reports_invalid_range() {
        let job = FitJob {
            id: Uuid::new_v4(),
            text: "Go".into(),
            container_width: 480.0,
            font: None,
            min_font_size: Some(80.0),
            max_font_size: Some(20.0),
        };
        let result = run_job(&job, &defaults());
        let error = result.error.unwrap();
        assert_eq!(error["error"]["code"], "FIT_ERROR");
        assert_eq!(result.font_size, None);
    }

    #[test]
    fn test_load_jobs_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"text": "Adventure", "container_width": 600}}]"#).unwrap();
        let jobs = load_jobs(Some(file.path())).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].text, "Adventure");
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let jobs = parse_jobs(
            r#"[
                {"text": "Roam", "container_width": 300},
                {"text": "Roam", "container_width": -1},
                {"text": "", "container_width": 300}
            ]"#,
        )
        .unwrap();
        let results = run_jobs(jobs, defaults()).await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].font_size.is_some());
        assert!(results[1].error.is_some());
        assert_eq!(results[2].skipped, Some(SkipReason::EmptyText));
    }
}
