use crate::infra::{seed_demo_roster, InMemoryPlayerRepository};
use clap::Args;
use courtside::development::{
    AttributeCatalog, PlayerEvaluation, Position, RecommendationEngine, ScoreEvaluator,
    TrainingRecommendation,
};
use courtside::error::AppError;
use courtside::import::AssessmentImporter;
use courtside::roster::RosterService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Position to rate against (PG, SG, SF, PF, C or the full name)
    #[arg(long)]
    pub(crate) position: Position,
    /// CSV export with Attribute, Value and Potential columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Maximum number of training recommendations to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Optional JSON attribute catalog replacing the standard one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only report players on this team
    #[arg(long)]
    pub(crate) team: Option<String>,
    /// Print development reports as JSON payloads
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        position,
        csv,
        limit,
        catalog,
    } = args;

    let catalog = Arc::new(match catalog {
        Some(path) => AttributeCatalog::from_path(path)?,
        None => AttributeCatalog::standard(),
    });
    let attributes = AssessmentImporter::new(&catalog).import_path(&csv)?;

    let evaluator = ScoreEvaluator::new(catalog.clone());
    let engine = match limit {
        Some(limit) => RecommendationEngine::with_limit(catalog, limit),
        None => RecommendationEngine::new(catalog),
    };

    println!(
        "Assessment from {} ({} attributes)",
        csv.display(),
        attributes.len()
    );
    let evaluation = evaluator.evaluate(&attributes, position);
    render_evaluation(&evaluation);
    render_recommendations(&engine.generate_training_recommendations(&attributes, position));

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { team, json } = args;

    println!("Player development demo");
    let service = RosterService::new(
        Arc::new(InMemoryPlayerRepository::default()),
        Arc::new(AttributeCatalog::standard()),
    );
    seed_demo_roster(&service)?;

    let roster = service.list(team.as_deref())?;
    if roster.is_empty() {
        println!("No players matched the requested team.");
        return Ok(());
    }

    println!("\nRoster");
    for player in &roster {
        let rating = player
            .overall_rating
            .map(|rating| rating.to_string())
            .unwrap_or_else(|| "unrated".to_string());
        println!(
            "- {} ({}, {}) | rating {} | {} assessments",
            player.name,
            player.position_label,
            player.team.as_deref().unwrap_or("unassigned"),
            rating,
            player.assessment_count
        );
    }

    for player in &roster {
        let report = service.development_report(&player.player_id)?;
        println!("\n{} [{}]", report.profile.name, report.profile.player_id);

        if json {
            match serde_json::to_string_pretty(&report) {
                Ok(payload) => println!("{payload}"),
                Err(err) => println!("  Report payload unavailable: {err}"),
            }
            continue;
        }

        if let Some(assessed_on) = report.assessed_on {
            println!("  Latest assessment: {assessed_on}");
        }
        render_evaluation(&report.evaluation);
        render_recommendations(&report.recommendations);

        println!("  Progress:");
        for point in service.progress(&player.player_id)? {
            let change = point
                .rating_change
                .map(|delta| format!(" ({delta:+})"))
                .unwrap_or_default();
            println!(
                "    - {}: {}{} | {} stars",
                point.assessed_on, point.overall_rating, change, point.stars
            );
        }
    }

    Ok(())
}

fn render_evaluation(evaluation: &PlayerEvaluation) {
    println!(
        "  {} rating: {} ({} stars)",
        evaluation.position.label(),
        evaluation.overall_rating,
        evaluation.stars
    );
    println!("  Skill levels:");
    for attribute in &evaluation.attributes {
        let weight = attribute
            .weight
            .map(|weight| format!(" | weight {weight:.1}"))
            .unwrap_or_default();
        println!(
            "    - {}: {:.0}/{:.0} {}{}",
            attribute.display_name,
            attribute.value,
            attribute.potential,
            attribute.skill_level.label(),
            weight
        );
    }
}

fn render_recommendations(recommendations: &[TrainingRecommendation]) {
    if recommendations.is_empty() {
        println!("  Training plan: no weighted attributes assessed for this position");
        return;
    }

    println!("  Training plan:");
    for recommendation in recommendations {
        println!(
            "    - [{}] {} ({})",
            recommendation.priority.label(),
            recommendation.title,
            recommendation.duration
        );
        println!("      {}", recommendation.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside::import::AssessmentImportError;
    use std::io::Write;

    #[test]
    fn assess_reports_missing_csv() {
        let args = AssessArgs {
            position: Position::SG,
            csv: PathBuf::from("does/not/exist.csv"),
            limit: None,
            catalog: None,
        };

        assert!(matches!(run_assess(args), Err(AppError::Import(_))));
    }

    #[test]
    fn assess_scores_exported_csv() {
        let path = std::env::temp_dir().join(format!(
            "courtside-assess-{}.csv",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "Attribute,Value,Potential\nShooting,3,14\nSpeed,9,13").expect("write csv");

        let result = run_assess(AssessArgs {
            position: Position::SG,
            csv: path.clone(),
            limit: Some(1),
            catalog: None,
        });
        let _ = std::fs::remove_file(&path);

        assert!(result.is_ok());
    }

    #[test]
    fn assess_rejects_unscaled_csv_scores() {
        let path = std::env::temp_dir().join(format!(
            "courtside-assess-nan-{}.csv",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(
            file,
            "Attribute,Value,Potential\nShooting,NaN,16\nBall Handling,40,40\nPassing,4,10"
        )
        .expect("write csv");

        let result = run_assess(AssessArgs {
            position: Position::PG,
            csv: path.clone(),
            limit: None,
            catalog: None,
        });
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            result,
            Err(AppError::Import(AssessmentImportError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn demo_runs_for_unknown_team() {
        let args = DemoArgs {
            team: Some("Alumni".to_string()),
            json: false,
        };

        assert!(run_demo(args).is_ok());
    }
}
