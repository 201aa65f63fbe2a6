//! In-memory filters over fully loaded listings.
//!
//! Views narrow a snapshot with these before handing it to
//! [`pagination`] for slicing. Nothing here talks to the backend.

use super::{ApplicationStatus, EmploymentStatus, Job, JobApplicationGroup, UserListItem};

/// Role selector on the user-management view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleFilter {
    /// Every role.
    #[default]
    All,
    /// Only users whose role equals this one, ignoring case.
    Only(String),
}

impl RoleFilter {
    /// Parse a selector value; `All` (any case) or blank selects every role.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_owned())
        }
    }

    fn matches(&self, role: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.to_lowercase() == role.to_lowercase(),
        }
    }
}

/// Search box plus role selector for the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Substring matched against name or email, ignoring case.
    pub search: String,
    /// Role selector.
    pub role: RoleFilter,
}

impl UserFilter {
    /// Whether `user` passes both the search and the role selector.
    pub fn matches(&self, user: &UserListItem) -> bool {
        let needle = self.search.to_lowercase();
        let text_match = needle.is_empty()
            || user.name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle);
        text_match && self.role.matches(&user.role)
    }

    /// Users passing the filter, in listing order.
    ///
    /// # Examples
    /// ```
    /// use jobboard::domain::{RoleFilter, UserFilter};
    ///
    /// let filter = UserFilter { search: "ADA".to_owned(), role: RoleFilter::All };
    /// assert!(filter.apply(&[]).is_empty());
    /// ```
    pub fn apply<'a>(&self, users: &'a [UserListItem]) -> Vec<&'a UserListItem> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}

/// Employment-status selector on the manage-jobs view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every posting.
    #[default]
    All,
    /// Only postings with this status.
    Only(EmploymentStatus),
}

impl StatusFilter {
    /// Postings passing the selector, in listing order.
    pub fn apply<'a>(self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter()
            .filter(|job| match self {
                Self::All => true,
                Self::Only(status) => job.employment_status() == status,
            })
            .collect()
    }
}

/// Job-title and status selectors on the view-applications page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// Exact job title, or `None` for every job.
    pub job_title: Option<String>,
    /// Review state, or `None` for every state.
    pub status: Option<ApplicationStatus>,
}

impl ApplicationFilter {
    /// Narrow `groups` by title, then by status.
    ///
    /// When a status is selected, groups left without applications are
    /// dropped. Counts are recomputed for the narrowed groups.
    pub fn apply(&self, groups: &[JobApplicationGroup]) -> Vec<JobApplicationGroup> {
        groups
            .iter()
            .filter(|group| {
                self.job_title
                    .as_deref()
                    .is_none_or(|title| group.job_title == title)
            })
            .filter_map(|group| match self.status {
                None => Some(group.clone()),
                Some(status) => {
                    let applications: Vec<_> = group
                        .applications
                        .iter()
                        .filter(|application| application.status == status)
                        .cloned()
                        .collect();
                    (!applications.is_empty()).then(|| JobApplicationGroup {
                        job_title: group.job_title.clone(),
                        job_id: group.job_id,
                        applications,
                        applications_count: 0,
                    })
                }
            })
            .map(JobApplicationGroup::with_derived_count)
            .collect()
    }
}
