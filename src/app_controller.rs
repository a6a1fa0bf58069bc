use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{AppError, ExtractionError};
use crate::extractor::TextExtractor;
use crate::file_utils::FileManager;
use crate::translation::TranslationService;

// @module: Application controller for article translation

/// Result of a single run
#[derive(Debug)]
pub enum RunOutcome {
    /// Translation finished and should be printed
    Translated(String),
    /// Translation was written to the given file
    Saved(PathBuf),
    /// Nothing could be extracted; no translation was attempted
    ExtractionFailed(ExtractionError),
}

/// Main application controller: extract, translate, write
pub struct Controller {
    // @field: Page fetcher and text cleaner
    extractor: TextExtractor,
    // @field: Chat-completion backed translator
    translator: TranslationService,
    // @field: Show a spinner while waiting on the provider
    show_progress: bool,
}

impl Controller {
    /// Create a controller from explicit components
    pub fn new(extractor: TextExtractor, translator: TranslationService) -> Self {
        Self {
            extractor,
            translator,
            show_progress: false,
        }
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: &Config) -> Result<Self, AppError> {
        config.validate()?;

        let extractor = TextExtractor::new(&config.fetch)?;
        let translator = TranslationService::from_config(&config.provider)?;

        Ok(Self::new(extractor, translator))
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the workflow for one URL
    ///
    /// Extraction failures are reported as [`RunOutcome::ExtractionFailed`]
    /// and never reach the translator. Translation and write failures are
    /// returned as errors.
    pub async fn run(&self, url: &str, target_language: &str, output: Option<&Path>) -> Result<RunOutcome, AppError> {
        let start_time = Instant::now();

        let text = match self.extractor.extract_text_from_url(url).await {
            Ok(text) => text,
            Err(e) => return Ok(RunOutcome::ExtractionFailed(e)),
        };

        let progress_bar = self.spinner();
        let translation = self.translator.translate(&text, target_language).await;
        progress_bar.finish_and_clear();
        let translation = translation?;

        info!("Translation completed in {}.", Self::format_duration(start_time.elapsed()));

        match output {
            Some(path) => {
                FileManager::write_to_file(path, &translation)
                    .map_err(|e| AppError::File(format!("{:#}", e)))?;
                info!("Translation saved to {}", path.display());
                Ok(RunOutcome::Saved(path.to_path_buf()))
            }
            None => Ok(RunOutcome::Translated(translation)),
        }
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        progress_bar.set_style(style);
        progress_bar.set_message("Translating...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
