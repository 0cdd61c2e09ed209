use crate::modules::cohort_hours::core::records::{Mismatch, RosterEntry, TimeEntry};

/// Cross-checks a batch of parsed time entries against the roster and flags
/// entries filed under a project other than the user's assigned one.
///
/// One mismatch per (user, filed_project) pair per batch; a user missing
/// from the roster entirely still yields a mismatch, with no correct
/// project. When several roster rows share a name the first one wins; the
/// roster is supposed to hold one project per user.
pub fn reconcile(entries: &[TimeEntry], roster: &[RosterEntry]) -> Vec<Mismatch> {
    let mut mismatches: Vec<Mismatch> = Vec::new();

    for entry in entries {
        let assigned = roster
            .iter()
            .any(|member| member.name == entry.user && member.project == entry.project);
        if assigned {
            continue;
        }

        let seen = mismatches
            .iter()
            .any(|m| m.user == entry.user && m.filed_project == entry.project);
        if seen {
            continue;
        }

        let correct_project = roster
            .iter()
            .find(|member| member.name == entry.user)
            .map(|member| member.project.clone());

        mismatches.push(Mismatch {
            user: entry.user.clone(),
            filed_project: entry.project.clone(),
            correct_project,
        });
    }

    mismatches
}

#[cfg(test)]
mod reconcile_tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn entry(user: &str, project: &str) -> TimeEntry {
        TimeEntry {
            project: project.to_string(),
            client: None,
            week_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            week_end: None,
            user: user.to_string(),
            time: "05:00:00".to_string(),
            time_decimal: None,
        }
    }

    fn member(name: &str, project: &str) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            project: project.to_string(),
        }
    }

    #[rstest]
    fn it_should_accept_an_entry_filed_under_the_assigned_project() {
        let mismatches = reconcile(&[entry("Alice", "ProjX")], &[member("Alice", "ProjX")]);
        assert!(mismatches.is_empty());
    }

    #[rstest]
    fn it_should_flag_an_entry_filed_under_another_project() {
        let mismatches = reconcile(&[entry("Alice", "ProjY")], &[member("Alice", "ProjX")]);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                user: "Alice".to_string(),
                filed_project: "ProjY".to_string(),
                correct_project: Some("ProjX".to_string()),
            }]
        );
    }

    #[rstest]
    fn it_should_fall_back_to_no_correct_project_for_an_unrostered_user() {
        let mismatches = reconcile(&[entry("Ghost", "ProjX")], &[member("Alice", "ProjX")]);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                user: "Ghost".to_string(),
                filed_project: "ProjX".to_string(),
                correct_project: None,
            }]
        );
    }

    #[rstest]
    fn it_should_emit_one_mismatch_per_user_and_project_pair_per_batch() {
        let entries = vec![
            entry("Ghost", "ProjX"),
            entry("Ghost", "ProjX"),
            entry("Ghost", "ProjX"),
        ];
        let mismatches = reconcile(&entries, &[]);
        assert_eq!(mismatches.len(), 1);
    }

    #[rstest]
    fn it_should_keep_mismatches_for_distinct_filed_projects_separate() {
        let entries = vec![entry("Alice", "ProjY"), entry("Alice", "ProjZ")];
        let mismatches = reconcile(&entries, &[member("Alice", "ProjX")]);
        assert_eq!(mismatches.len(), 2);
        assert!(mismatches.iter().all(|m| m.user == "Alice"));
        assert!(
            mismatches
                .iter()
                .all(|m| m.correct_project.as_deref() == Some("ProjX"))
        );
    }

    #[rstest]
    fn it_should_take_the_first_roster_row_when_a_name_appears_twice() {
        let roster = vec![member("Alice", "ProjX"), member("Alice", "ProjZ")];
        let mismatches = reconcile(&[entry("Alice", "ProjY")], &roster);
        assert_eq!(mismatches[0].correct_project.as_deref(), Some("ProjX"));
    }
}
