// src/config/paths.rs
//
// Path resolution for input audio and output artifacts. Symbolic audio
// keys and analysis-type names map to filesystem locations through an
// explicit configuration structure instead of scattered constants.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PipelineError, Result};

/// Extensions treated as audio when scanning the audio directory.
const AUDIO_EXTENSIONS: [&str; 6] = ["wav", "mp3", "flac", "ogg", "m4a", "aac"];

/// Environment variables that override the default path layout.
pub const ENV_BASE_DIR: &str = "WAVEPLOT_BASE_DIR";
pub const ENV_DATA_DIR: &str = "WAVEPLOT_DATA_DIR";
pub const ENV_OUTPUT_DIR: &str = "WAVEPLOT_OUTPUT_DIR";
pub const ENV_AUDIO_DIR: &str = "WAVEPLOT_AUDIO_DIR";

/// Output partition for an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnalysisDomain {
    TimeDomain,
    FrequencyDomain,
}

impl AnalysisDomain {
    /// Configuration key, as accepted by `PathConfig::output_path`.
    pub fn key(&self) -> &'static str {
        match self {
            AnalysisDomain::TimeDomain => "time_domain",
            AnalysisDomain::FrequencyDomain => "frequency_domain",
        }
    }

    /// Directory name under the output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            AnalysisDomain::TimeDomain => "time_domain_audio_representations",
            AnalysisDomain::FrequencyDomain => "frequency_domain_audio_representations",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "time_domain" => Some(AnalysisDomain::TimeDomain),
            "frequency_domain" => Some(AnalysisDomain::FrequencyDomain),
            _ => None,
        }
    }

    pub fn all() -> [Self; 2] {
        [AnalysisDomain::TimeDomain, AnalysisDomain::FrequencyDomain]
    }
}

/// Resolved filesystem layout plus the symbolic audio-key mapping.
#[derive(Debug, Clone)]
pub struct PathConfig {
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub audio_dir: PathBuf,
    audio_files: BTreeMap<String, PathBuf>,
}

impl PathConfig {
    /// Layout rooted at `base_dir`: `local_data/` for data,
    /// `local_data/output_graphs/` for charts and
    /// `local_data/raw_audio_files/` for inputs.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let data_dir = base_dir.join("local_data");
        let output_dir = data_dir.join("output_graphs");
        let audio_dir = data_dir.join("raw_audio_files");
        let mut config = Self {
            base_dir,
            data_dir,
            output_dir,
            audio_dir,
            audio_files: BTreeMap::new(),
        };
        config.register_builtin_keys();
        config
    }

    /// Build from the current directory, honoring the `WAVEPLOT_*_DIR`
    /// environment overrides for each level of the layout.
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os(ENV_BASE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::new(base_dir);

        if let Some(dir) = std::env::var_os(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(&dir);
            config.output_dir = config.data_dir.join("output_graphs");
            config.audio_dir = config.data_dir.join("raw_audio_files");
        }
        if let Some(dir) = std::env::var_os(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = std::env::var_os(ENV_AUDIO_DIR) {
            config.audio_dir = PathBuf::from(dir);
        }

        // Re-anchor the built-in keys on the final audio directory.
        config.audio_files.clear();
        config.register_builtin_keys();
        config
    }

    fn register_builtin_keys(&mut self) {
        self.register_audio_file("sax_a3", "sax-baritone_a3.wav");
        self.register_audio_file("suno_wits", "SUNO_Whispers-in-the-Shadows.mp3");
    }

    /// Point the configuration at a different audio directory,
    /// re-anchoring the built-in keys on it.
    pub fn set_audio_dir(&mut self, dir: impl Into<PathBuf>) {
        self.audio_dir = dir.into();
        self.audio_files.clear();
        self.register_builtin_keys();
    }

    /// Map `key` to `file_name` inside the audio directory.
    pub fn register_audio_file(&mut self, key: &str, file_name: &str) {
        self.audio_files
            .insert(key.to_string(), self.audio_dir.join(file_name));
    }

    /// Scan the audio directory and register every audio file under its
    /// stem, skipping stems already mapped.
    pub fn discover_audio_files(&mut self) -> usize {
        let mut added = 0;
        for entry in WalkDir::new(&self.audio_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !has_audio_extension(path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !self.audio_files.contains_key(stem) {
                self.audio_files.insert(stem.to_string(), path.to_path_buf());
                added += 1;
            }
        }
        added
    }

    /// Resolve a symbolic audio key to its configured path.
    pub fn audio_path(&self, key: &str) -> Result<&Path> {
        self.audio_files
            .get(key)
            .map(PathBuf::as_path)
            .ok_or_else(|| PipelineError::UnknownKey(key.to_string()))
    }

    /// Registered keys in sorted order.
    pub fn audio_keys(&self) -> impl Iterator<Item = &str> {
        self.audio_files.keys().map(String::as_str)
    }

    /// Output directory for an analysis domain.
    pub fn output_dir_for(&self, domain: AnalysisDomain) -> PathBuf {
        self.output_dir.join(domain.dir_name())
    }

    /// Resolve `<output>/<domain dir>/<stem>.<extension>`, creating the
    /// directory on the way. Unrecognized analysis-type names fail.
    pub fn output_path(&self, analysis_type: &str, stem: &str, extension: &str) -> Result<PathBuf> {
        let domain = AnalysisDomain::from_key(analysis_type)
            .ok_or_else(|| PipelineError::UnknownAnalysisType(analysis_type.to_string()))?;
        let dir = self.output_dir_for(domain);
        ensure_directory(&dir)?;
        Ok(dir.join(format!("{}.{}", stem, extension)))
    }

    /// Directory for per-run log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("output_logs")
    }

    /// Create every output directory.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        for domain in AnalysisDomain::all() {
            ensure_directory(&self.output_dir_for(domain))?;
        }
        Ok(())
    }

    /// Startup check: every registered audio file must exist on disk.
    /// Returns the keys whose files are missing.
    pub fn validate(&self) -> Vec<(String, PathBuf)> {
        self.audio_files
            .iter()
            .filter(|(_, path)| !path.exists())
            .map(|(key, path)| (key.clone(), path.clone()))
            .collect()
    }
}

/// Create `path` and any missing parents. A no-op when it already exists.
pub fn ensure_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_present() {
        let config = PathConfig::new("/tmp/wp");
        assert!(config.audio_path("sax_a3").is_ok());
        assert!(config.audio_path("suno_wits").is_ok());
    }

    #[test]
    fn test_unknown_key_errors() {
        let config = PathConfig::new("/tmp/wp");
        match config.audio_path("nope") {
            Err(PipelineError::UnknownKey(key)) => assert_eq!(key, "nope"),
            other => panic!("expected UnknownKey, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_analysis_type_errors() {
        let config = PathConfig::new("/tmp/wp");
        assert!(matches!(
            config.output_path("sideways_domain", "x", "png"),
            Err(PipelineError::UnknownAnalysisType(_))
        ));
    }

    #[test]
    fn test_domain_keys_round_trip() {
        for domain in AnalysisDomain::all() {
            assert_eq!(AnalysisDomain::from_key(domain.key()), Some(domain));
        }
    }

    #[test]
    fn test_audio_extension_filter() {
        assert!(has_audio_extension(Path::new("a/b/tone.WAV")));
        assert!(has_audio_extension(Path::new("song.mp3")));
        assert!(!has_audio_extension(Path::new("notes.txt")));
        assert!(!has_audio_extension(Path::new("bare")));
    }
}
