//! File conversion: render `.tml` sources into `.txt` files.
//!
//! Every source is rendered with a fresh context, so documents are fully
//! independent and a directory can be converted in parallel.
//!
//! # Example
//!
//! ```no_run
//! use txtml::convert::{ConvertOptions, Converter};
//!
//! fn main() -> txtml::Result<()> {
//!     let converter = Converter::new(ConvertOptions::default());
//!     let report = converter.convert_dir("docs")?;
//!     println!("{} converted, {} failed", report.converted.len(), report.failed.len());
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::ParseOptions;
use crate::render::{self, RenderOptions, RenderResult, RenderStats, Warning};
use crate::tags::TagRegistry;
use crate::util::decode_lossy;

/// Extension of markup sources.
pub const SOURCE_EXTENSION: &str = "tml";

/// Extension of rendered output.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Options for file conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Convert files of a directory concurrently
    pub parallel: bool,

    /// Directory for output files (next to each source when `None`)
    pub output_dir: Option<PathBuf>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable or disable parallel conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Convert one file at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Write output files into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
            parallel: true,
            output_dir: None,
        }
    }
}

/// Result of converting one file.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// Source path
    pub input: PathBuf,

    /// Written output path
    pub output: PathBuf,

    /// Rendered content with diagnostics
    pub result: RenderResult,
}

/// A file that could not be converted.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    /// Source path
    pub input: PathBuf,

    /// Error message
    pub error: String,
}

/// Outcome of converting a set of files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Successfully converted files, in input order
    pub converted: Vec<ConvertResult>,

    /// Files that failed, in input order
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// True when there was nothing to convert.
    pub fn is_empty(&self) -> bool {
        self.converted.is_empty() && self.failed.is_empty()
    }

    /// Number of files processed.
    pub fn file_count(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Total warnings over all converted files.
    pub fn warning_count(&self) -> usize {
        self.converted.iter().map(|c| c.result.warnings.len()).sum()
    }

    /// Statistics merged over all converted files.
    pub fn total_stats(&self) -> RenderStats {
        let mut stats = RenderStats::new();
        for converted in &self.converted {
            stats.merge(&converted.result.stats);
        }
        stats
    }
}

/// List the `.tml` files of `dir`, sorted by path.
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_source_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
}

/// Read a source file as text.
///
/// Invalid UTF-8 does not fail the read: offending bytes are replaced and
/// a warning is returned alongside the text.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<(String, Option<Warning>)> {
    let path = path.as_ref();
    Ok(decode_source(path, fs::read(path)?))
}

fn decode_source(path: &Path, bytes: Vec<u8>) -> (String, Option<Warning>) {
    let (text, lossy) = decode_lossy(bytes);
    let warning = lossy.then(|| Warning::InvalidUtf8 {
        path: path.to_path_buf(),
    });
    (text, warning)
}

/// Output path for `input`: same stem with the `.txt` extension, inside
/// `output_dir` when given.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let renamed = input.with_extension(OUTPUT_EXTENSION);
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Renders files with a tag registry.
pub struct Converter {
    registry: TagRegistry,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the built-in tags.
    pub fn new(options: ConvertOptions) -> Self {
        Self::with_registry(TagRegistry::with_defaults(), options)
    }

    /// Create a converter with a custom registry.
    pub fn with_registry(registry: TagRegistry, options: ConvertOptions) -> Self {
        Self { registry, options }
    }

    /// Conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Tag registry.
    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Render source text. Relative `insert` paths resolve against
    /// `base_dir` unless the render options name one.
    pub fn render_source(&self, source: &str, base_dir: Option<&Path>) -> Result<RenderResult> {
        let mut options = self.options.render.clone();
        if options.base_dir.is_none() {
            options.base_dir = base_dir.map(Path::to_path_buf);
        }
        render::render(source, &self.registry, &self.options.parse, &options)
    }

    /// Render one file and write the output next to it (or into the
    /// configured output directory).
    pub fn convert_file<P: AsRef<Path>>(&self, input: P) -> Result<ConvertResult> {
        let input = input.as_ref();
        let (source, warning) = read_source(input)?;
        let mut result = self.render_source(&source, input.parent())?;
        if let Some(warning) = warning {
            result.prepend_warning(warning);
        }

        let output = output_path(input, self.options.output_dir.as_deref());
        fs::write(&output, &result.content)?;
        log::debug!("{} -> {}", input.display(), output.display());

        Ok(ConvertResult {
            input: input.to_path_buf(),
            output,
            result,
        })
    }

    /// Convert every `.tml` file of `dir`.
    ///
    /// A directory without sources yields an empty report.
    pub fn convert_dir<P: AsRef<Path>>(&self, dir: P) -> Result<BatchReport> {
        let files = discover(dir)?;
        Ok(self.convert_files(&files, |_, _| {}))
    }

    /// Convert `files`, calling `on_file` as each one finishes.
    ///
    /// Per-file failures are collected in the report rather than returned.
    pub fn convert_files<F>(&self, files: &[PathBuf], on_file: F) -> BatchReport
    where
        F: Fn(&Path, &Result<ConvertResult>) + Sync,
    {
        let convert = |path: &PathBuf| {
            let outcome = self.convert_file(path);
            on_file(path, &outcome);
            (path.clone(), outcome)
        };

        let outcomes: Vec<(PathBuf, Result<ConvertResult>)> = if self.options.parallel {
            files.par_iter().map(convert).collect()
        } else {
            files.iter().map(convert).collect()
        };

        let mut report = BatchReport::default();
        for (input, outcome) in outcomes {
            match outcome {
                Ok(converted) => report.converted.push(converted),
                Err(err) => {
                    log::warn!("{}: {}", input.display(), err);
                    report.failed.push(FailedFile {
                        input,
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Convert one file with the built-in tags.
pub fn convert_file<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<ConvertResult> {
    Converter::new(options.clone()).convert_file(input)
}

/// Convert every `.tml` file of `dir` with the built-in tags.
pub fn convert_dir<P: AsRef<Path>>(dir: P, options: &ConvertOptions) -> Result<BatchReport> {
    Converter::new(options.clone()).convert_dir(dir)
}

/// Convert one file using async file I/O.
#[cfg(feature = "async")]
pub async fn convert_file_async<P: AsRef<Path>>(
    input: P,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let input = input.as_ref();
    let (source, warning) = decode_source(input, tokio::fs::read(input).await?);
    let mut result = Converter::new(options.clone()).render_source(&source, input.parent())?;
    if let Some(warning) = warning {
        result.prepend_warning(warning);
    }

    let output = output_path(input, options.output_dir.as_deref());
    tokio::fs::write(&output, &result.content).await?;

    Ok(ConvertResult {
        input: input.to_path_buf(),
        output,
        result,
    })
}
