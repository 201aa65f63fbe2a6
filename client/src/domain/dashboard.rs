//! Dashboard figures composed from several container snapshots.
//!
//! Containers never read each other; the view layer hands their snapshots
//! to these constructors.

use serde::Serialize;

use super::{EmploymentStatus, Job, JobApplicationGroup, JobStats};

/// Figures on the employer dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDashboard {
    /// Postings owned by the employer.
    pub total_jobs: usize,
    /// Owned postings that are open.
    pub active_jobs: usize,
    /// Applications across all owned postings.
    pub total_applications: usize,
}

impl EmployerDashboard {
    /// Summarise the employer's jobs and application groups.
    pub fn compose(jobs: &[Job], groups: &[JobApplicationGroup]) -> Self {
        Self {
            total_jobs: jobs.len(),
            active_jobs: jobs
                .iter()
                .filter(|job| job.employment_status() == EmploymentStatus::Active)
                .count(),
            total_applications: groups.iter().map(|group| group.applications.len()).sum(),
        }
    }
}

/// Figures on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    /// Candidate profiles on the board.
    pub candidates: usize,
    /// Employer profiles on the board.
    pub employers: usize,
    /// Applications across the board.
    pub total_applications: u64,
    /// Postings across the board.
    pub total_jobs: u64,
    /// Open postings across the board.
    pub active_jobs: u64,
}

impl AdminDashboard {
    /// Combine list sizes with the server-side counters.
    pub fn compose(candidates: usize, employers: usize, total_applications: u64, stats: JobStats) -> Self {
        Self {
            candidates,
            employers,
            total_applications,
            total_jobs: stats.total_jobs,
            active_jobs: stats.active_jobs,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ApplicationStatus;
    use crate::domain::application::fixtures::{application, group};
    use crate::domain::job::fixtures::job;
    use rstest::rstest;

    #[rstest]
    fn employer_dashboard_counts_active_jobs_and_applications() {
        let jobs = vec![
            job(1, "A", EmploymentStatus::Active),
            job(2, "B", EmploymentStatus::Filled),
        ];
        let groups = vec![
            group(1, "A", vec![application(1, 1, "A", ApplicationStatus::Pending)]),
            group(
                2,
                "B",
                vec![
                    application(2, 2, "B", ApplicationStatus::Pending),
                    application(3, 2, "B", ApplicationStatus::Reviewed),
                ],
            ),
        ];
        assert_eq!(
            EmployerDashboard::compose(&jobs, &groups),
            EmployerDashboard {
                total_jobs: 2,
                active_jobs: 1,
                total_applications: 3,
            }
        );
    }

    #[rstest]
    fn admin_dashboard_copies_server_counters() {
        let dashboard = AdminDashboard::compose(
            4,
            2,
            11,
            JobStats {
                total_jobs: 7,
                active_jobs: 5,
            },
        );
        assert_eq!(dashboard.total_jobs, 7);
        assert_eq!(dashboard.active_jobs, 5);
        assert_eq!(dashboard.candidates, 4);
    }
}
