use crate::models::job::{Applicant, Job};

/// Scored applicants, highest overall score first. Applicants still awaiting
/// analysis are left out; equal scores keep submission order.
pub fn rank_applicants(applicants: &[Applicant]) -> Vec<&Applicant> {
    let mut ranked: Vec<(&Applicant, f64)> = applicants
        .iter()
        .filter_map(|a| a.overall_score().map(|score| (a, score)))
        .collect();
    // sort_by is stable
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    ranked.into_iter().map(|(a, _)| a).collect()
}

pub fn pending_count(job: &Job) -> usize {
    job.applicants
        .iter()
        .filter(|a| a.is_pending_analysis())
        .count()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::job::OverallScore;

    fn applicant(name: &str, score: Option<f64>) -> Applicant {
        Applicant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            job_id: Uuid::nil(),
            responses: vec![],
            analysis_output: None,
            overall_score_data: score.map(|overall_score| OverallScore {
                summary: format!("{name} summary"),
                overall_score,
            }),
            submitted_at: 0,
        }
    }

    fn names(ranked: &[&Applicant]) -> Vec<String> {
        ranked.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn test_ranking_sorts_by_score_descending() {
        let applicants = vec![
            applicant("low", Some(40.0)),
            applicant("high", Some(95.5)),
            applicant("mid", Some(70.0)),
        ];
        assert_eq!(names(&rank_applicants(&applicants)), ["high", "mid", "low"]);
    }

    #[test]
    fn test_ranking_excludes_pending_applicants() {
        let applicants = vec![
            applicant("pending", None),
            applicant("scored", Some(10.0)),
            applicant("also pending", None),
        ];
        assert_eq!(names(&rank_applicants(&applicants)), ["scored"]);
    }

    #[test]
    fn test_ranking_keeps_submission_order_on_ties() {
        let applicants = vec![
            applicant("first", Some(80.0)),
            applicant("top", Some(90.0)),
            applicant("second", Some(80.0)),
            applicant("third", Some(80.0)),
        ];
        assert_eq!(
            names(&rank_applicants(&applicants)),
            ["top", "first", "second", "third"]
        );
    }

    #[test]
    fn test_pending_count() {
        let job = Job {
            id: Uuid::nil(),
            title: "t".to_string(),
            description_input: "d".to_string(),
            generated_listing_text: None,
            survey: None,
            applicants: vec![
                applicant("a", None),
                applicant("b", Some(1.0)),
                applicant("c", None),
            ],
            created_at: 0,
        };
        assert_eq!(pending_count(&job), 2);
    }
}
