use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ranker_core::{AnalysisConfig, Analyzer, ResultStore, ResumeInput, SledStore, StoredAnalysis};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_MAX_RESUMES: usize = 10;

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Rank plain-text resumes against a job description", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank resumes against a job description
    Analyze {
        /// Job description text file
        #[arg(long)]
        job: PathBuf,
        /// Resume file, or a directory searched for .txt and .md files (repeatable)
        #[arg(long = "resume", required = true)]
        resumes: Vec<PathBuf>,
        /// Also save the result in this store directory
        #[arg(long)]
        store: Option<PathBuf>,
        /// Write the JSON result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Number of job keywords to extract
        #[arg(long)]
        top_n: Option<usize>,
        /// Analysis config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Largest batch accepted
        #[arg(long, default_value_t = DEFAULT_MAX_RESUMES)]
        max_resumes: usize,
    },
    /// List stored analyses, newest first
    History {
        #[arg(long)]
        store: PathBuf,
    },
    /// Print one stored analysis
    Show {
        #[arg(long)]
        store: PathBuf,
        id: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { job, resumes, store, output, top_n, config, max_resumes } => {
            let options = AnalyzeOptions { store, output, top_n, config, max_resumes };
            analyze(&job, &resumes, &options)
        }
        Commands::History { store } => {
            let store = SledStore::open(&store)?;
            print_json(&store.list()?, None)
        }
        Commands::Show { store, id } => {
            let store = SledStore::open(&store)?;
            let record = store.get(&id)?.ok_or_else(|| anyhow!("no analysis with id {id}"))?;
            print_json(&record, None)
        }
    }
}

struct AnalyzeOptions {
    store: Option<PathBuf>,
    output: Option<PathBuf>,
    top_n: Option<usize>,
    config: Option<PathBuf>,
    max_resumes: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self { store: None, output: None, top_n: None, config: None, max_resumes: DEFAULT_MAX_RESUMES }
    }
}

fn analyze(job: &Path, resume_paths: &[PathBuf], options: &AnalyzeOptions) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(n) = options.top_n {
        config.job_keyword_limit = n;
    }

    let job_description = fs::read_to_string(job)
        .with_context(|| format!("failed to read job description {}", job.display()))?;
    let files = collect_resume_files(resume_paths);
    if files.is_empty() {
        return Err(anyhow!("no resume files found"));
    }
    if files.len() > options.max_resumes {
        return Err(anyhow!("{} resumes found, at most {} per analysis", files.len(), options.max_resumes));
    }
    let resumes: Vec<ResumeInput> = files.iter().map(|p| read_resume(p)).collect();
    tracing::info!(resumes = resumes.len(), "analyzing");

    let result = Analyzer::new(config).analyze(&job_description, &resumes)?;

    if let Some(dir) = &options.store {
        let store = SledStore::open(dir)?;
        let record = StoredAnalysis::new(job_description, result.clone());
        store.put(record.clone())?;
        eprintln!("stored analysis {}", record.id);
    }
    print_json(&result, options.output.as_deref())
}

/// Files are taken as given; directories are walked for .txt and .md files, each
/// directory's files sorted by path.
fn collect_resume_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && has_text_extension(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "txt" | "md"))
        .unwrap_or(false)
}

fn read_resume(path: &Path) -> ResumeInput {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match fs::read_to_string(path) {
        Ok(content) => ResumeInput::new(filename, content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable resume, scoring placeholder text");
            ResumeInput::unreadable(filename)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directories_yield_sorted_text_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("photo.png"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.TXT"), "c").unwrap();

        let files = collect_resume_files(&[dir.path().to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.md", "b.txt", "nested/c.TXT"]);
    }

    #[test]
    fn missing_resume_becomes_placeholder() {
        let dir = tempdir().unwrap();
        let input = read_resume(&dir.path().join("gone.txt"));
        assert_eq!(input.filename, "gone.txt");
        assert_eq!(input.content, "Error reading file: gone.txt");
    }

    #[test]
    fn analyze_writes_ranked_result() {
        let dir = tempdir().unwrap();
        let job = dir.path().join("job.txt");
        fs::write(&job, "Looking for a Python developer with Docker and AWS experience").unwrap();
        let resumes = dir.path().join("resumes");
        fs::create_dir(&resumes).unwrap();
        fs::write(resumes.join("dev.txt"), "Python developer. Built Docker images and deployed them on AWS.").unwrap();
        fs::write(resumes.join("chef.txt"), "Pastry chef with ten years of bakery experience").unwrap();
        let out = dir.path().join("out.json");

        let options = AnalyzeOptions { output: Some(out.clone()), top_n: Some(5), ..AnalyzeOptions::default() };
        analyze(&job, &[resumes], &options).unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["rankedResumes"][0]["filename"], "dev.txt");
        assert!(json["jobKeywords"].as_array().unwrap().len() <= 5);
        assert_eq!(json["summary"]["totalResumes"], 2);
    }

    #[test]
    fn missing_job_description_is_fatal() {
        let dir = tempdir().unwrap();
        let resume = dir.path().join("cv.txt");
        fs::write(&resume, "Python developer").unwrap();
        let options = AnalyzeOptions { output: Some(dir.path().join("o.json")), ..AnalyzeOptions::default() };
        assert!(analyze(&dir.path().join("nope.txt"), &[resume], &options).is_err());
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let dir = tempdir().unwrap();
        let job = dir.path().join("job.txt");
        fs::write(&job, "Looking for a Python developer with Docker and AWS experience").unwrap();
        let resumes = dir.path().join("resumes");
        fs::create_dir(&resumes).unwrap();
        for i in 0..3 {
            fs::write(resumes.join(format!("{i}.txt")), "Python developer").unwrap();
        }
        let out = dir.path().join("out.json");
        let options = AnalyzeOptions { output: Some(out.clone()), max_resumes: 2, ..AnalyzeOptions::default() };

        let err = analyze(&job, &[resumes], &options).unwrap_err();
        assert!(err.to_string().contains("at most 2"));
        assert!(!out.exists());
    }
}
