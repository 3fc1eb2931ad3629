use ranker_core::keywords::GENERIC_KEYWORDS;
use ranker_core::scorer::KeywordCoverage;
use ranker_core::{AnalysisConfig, Analyzer, KeywordExtractor, KeywordMatcher, ResumeInput};
use std::collections::HashSet;

const JD: &str = "Looking for a Python developer with Docker and AWS experience";

fn batch() -> Vec<ResumeInput> {
    vec![
        ResumeInput::new("none.txt", "Pastry chef. Ten years of bakery and catering experience."),
        ResumeInput::new("all.txt", "Python developer. I package services with Docker and run them on AWS."),
        ResumeInput::new("some.txt", "Java developer, some Docker exposure"),
        ResumeInput::unreadable("scan.pdf"),
        ResumeInput::new("some-again.txt", "Java developer, some Docker exposure"),
    ]
}

#[test]
fn scores_are_bounded_and_ranked() {
    let result = Analyzer::default().analyze(JD, &batch()).unwrap();
    assert_eq!(result.ranked_resumes.len(), 5);
    for r in &result.ranked_resumes {
        assert!(r.score <= 100);
        assert!(r.match_percentage <= 100);
    }
    for pair in result.ranked_resumes.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn ties_keep_submission_order() {
    let result = Analyzer::default().analyze(JD, &batch()).unwrap();
    let pos = |name: &str| result.ranked_resumes.iter().position(|r| r.filename == name).unwrap();
    assert_eq!(result.ranked_resumes[pos("some.txt")].score, result.ranked_resumes[pos("some-again.txt")].score);
    assert!(pos("some.txt") < pos("some-again.txt"));
}

#[test]
fn matching_and_missing_partition_job_keywords() {
    let result = Analyzer::default().analyze(JD, &batch()).unwrap();
    // five job keywords, so the output caps do not hide anything
    assert!(result.job_keywords.len() <= 10);
    let job: HashSet<&str> = result.job_keywords.iter().map(|k| k.term.as_str()).collect();
    for r in &result.ranked_resumes {
        let matching: HashSet<&str> = r.matching_keywords.iter().map(|k| k.term.as_str()).collect();
        let missing: HashSet<&str> = r.missing_keywords.iter().map(|k| k.term.as_str()).collect();
        assert!(matching.is_disjoint(&missing));
        assert_eq!(&matching | &missing, job);
    }
}

#[test]
fn coverage_partitions_before_capping() {
    let matcher = KeywordMatcher::default();
    let job = KeywordExtractor::default().extract(
        "Backend engineer: Rust, Go, Kafka, Postgres, Redis, Kubernetes, Terraform, gRPC, \
         observability, tracing, metrics, on-call experience, mentoring, architecture reviews",
        20,
    );
    let resume = matcher.prepare("Rust and Redis on Kubernetes; Terraform modules; Kafka consumers");
    let coverage = KeywordCoverage::compute(&job, &resume, &matcher);
    assert_eq!(coverage.matching.len() + coverage.missing.len(), job.len());
    assert!(coverage.matching.iter().all(|k| !coverage.missing.contains(k)));
}

#[test]
fn job_description_against_itself_is_a_perfect_match() {
    let result = Analyzer::default().analyze(JD, &[ResumeInput::new("jd.txt", JD)]).unwrap();
    let r = &result.ranked_resumes[0];
    assert_eq!(r.score, 100);
    assert_eq!(r.match_percentage, 100);
    assert!(r.missing_keywords.is_empty());
    assert!(r.feedback[0].starts_with("Excellent match"));
}

#[test]
fn fuzzy_matching_examples() {
    let matcher = KeywordMatcher::default();
    assert!(matcher.exists("machine learning", "Experienced in machine-learning pipelines"));
    assert!(matcher.exists("react", "I build UIs with ReactJS"));
}

#[test]
fn unrecognizable_input_yields_generic_keywords() {
    let keywords = KeywordExtractor::default().extract("@@@@ ~~~~ 9999 ????", 20);
    let terms: Vec<&str> = keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(terms, GENERIC_KEYWORDS.to_vec());
}

#[test]
fn candidate_with_all_terms_ranks_first() {
    let resumes = vec![
        ResumeInput::new("none.txt", "Pastry chef. Ten years of bakery and catering experience."),
        ResumeInput::new("all.txt", "Python developer. I package services with Docker and run them on AWS."),
    ];
    let result = Analyzer::default().analyze(JD, &resumes).unwrap();
    let find = |name: &str| result.ranked_resumes.iter().find(|r| r.filename == name).unwrap();
    let (all, none) = (find("all.txt"), find("none.txt"));
    assert!(all.matching_keywords.len() >= none.matching_keywords.len());
    assert!(all.score >= none.score);
    assert_eq!(result.ranked_resumes[0].filename, "all.txt");
}

#[test]
fn unreadable_resume_is_kept_with_everything_missing() {
    let result = Analyzer::default().analyze(JD, &batch()).unwrap();
    let scan = result.ranked_resumes.iter().find(|r| r.filename == "scan.pdf").unwrap();
    assert_eq!(scan.score, 0);
    assert!(scan.matching_keywords.is_empty());
    assert_eq!(scan.missing_keywords.len(), result.job_keywords.len());
    assert_eq!(result.ranked_resumes.last().map(|r| r.filename.as_str()), Some("scan.pdf"));
}

#[test]
fn summary_matches_ranked_resumes() {
    let result = Analyzer::new(AnalysisConfig { parallel: false, ..AnalysisConfig::default() })
        .analyze(JD, &batch())
        .unwrap();
    let scores: Vec<f64> = result.ranked_resumes.iter().map(|r| r.score as f64).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    assert_eq!(result.summary.average_score, mean.round() as u32);
    assert_eq!(result.summary.total_resumes, 5);
    assert_eq!(result.summary.top_score, result.ranked_resumes[0].score);
    assert_eq!(result.summary.top_candidate, result.ranked_resumes[0].filename);
}
